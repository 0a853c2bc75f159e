use crate::builder::GraphBuilder;
use crate::config::RankingConfig;
use crate::error::{GraphError, Result};
use crate::index::{FileTags, SymbolIndex};
use crate::pagerank::PageRank;
use context_tags::Tag;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Accumulated relevance of one (defining file, identifier) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSymbol {
    pub rel_fname: String,
    pub ident: String,
    pub score: f64,
}

/// Output of [`RelevanceRanker::rank`]
#[derive(Debug, Clone, Default)]
pub struct RankedTags {
    /// Definition tags of scored pairs, best first
    pub ranked: Vec<Tag>,

    /// One placeholder per enumerated file absent from `ranked`, in
    /// enumeration order
    pub placeholders: Vec<Tag>,

    /// Scored pairs, best first
    pub scores: Vec<ScoredSymbol>,
}

impl RankedTags {
    /// Ranked tags followed by placeholders
    pub fn into_tags(self) -> Vec<Tag> {
        let mut tags = self.ranked;
        tags.extend(self.placeholders);
        tags
    }
}

/// Ranks definitions by personalized PageRank over the symbol graph
pub struct RelevanceRanker {
    config: RankingConfig,
}

impl RelevanceRanker {
    pub fn new(config: RankingConfig) -> Result<Self> {
        config.validate().map_err(GraphError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Rank the definitions found in `files`.
    ///
    /// `mentioned_files` (relative paths) bias the PageRank teleport;
    /// `mentioned_idents` multiply their edge weights.
    pub fn rank(
        &self,
        files: &[FileTags],
        mentioned_files: &HashSet<String>,
        mentioned_idents: &HashSet<String>,
    ) -> RankedTags {
        let index = SymbolIndex::from_files(files);
        let graph = GraphBuilder::new(&self.config).build(&index, mentioned_idents);

        let personalization = self.personalization(files, mentioned_files);
        let ranks = PageRank::new(&self.config).compute(&graph, &personalization);

        // Spread each file's rank over its out-edges by weight
        let mut accumulated: BTreeMap<(String, String), f64> = BTreeMap::new();
        for (src, _) in graph.nodes() {
            let total_weight = graph.out_weight(src);
            if total_weight == 0.0 {
                continue;
            }
            let rank = ranks.get(src);
            for (dst, edge) in graph.out_edges(src) {
                *accumulated
                    .entry((graph.file(dst).to_string(), edge.ident.clone()))
                    .or_insert(0.0) += rank * edge.weight / total_weight;
            }
        }

        let mut scores: Vec<ScoredSymbol> = accumulated
            .into_iter()
            .map(|((rel_fname, ident), score)| ScoredSymbol {
                rel_fname,
                ident,
                score,
            })
            .collect();
        scores.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.rel_fname.cmp(&b.rel_fname))
                .then_with(|| a.ident.cmp(&b.ident))
        });

        let mut ranked = Vec::new();
        for scored in &scores {
            log::debug!("{:.6} {} {}", scored.score, scored.rel_fname, scored.ident);
            if let Some(tags) = index.definitions_of(&scored.rel_fname, &scored.ident) {
                ranked.extend(tags.iter().cloned());
            }
        }

        let ranked_files: HashSet<&str> = ranked.iter().map(|t| t.rel_fname.as_str()).collect();
        let placeholders: Vec<Tag> = files
            .iter()
            .filter(|f| !ranked_files.contains(f.rel_fname.as_str()))
            .map(|f| Tag::placeholder(f.rel_fname.as_str(), &f.fname))
            .collect();

        log::info!(
            "Ranked {} tags across {} symbols; {} files without ranked tags",
            ranked.len(),
            scores.len(),
            placeholders.len()
        );

        RankedTags {
            ranked,
            placeholders,
            scores,
        }
    }

    fn personalization(
        &self,
        files: &[FileTags],
        mentioned_files: &HashSet<String>,
    ) -> HashMap<String, f64> {
        if files.is_empty() {
            return HashMap::new();
        }
        let value = self.config.personalization_total / files.len() as f64;
        files
            .iter()
            .filter(|f| mentioned_files.contains(&f.rel_fname))
            .map(|f| (f.rel_fname.clone(), value))
            .collect()
    }
}

impl Default for RelevanceRanker {
    fn default() -> Self {
        Self {
            config: RankingConfig::default(),
        }
    }
}
