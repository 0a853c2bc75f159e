use crate::context::MapContext;
use crate::error::{MapError, Result};
use crate::request::MapRequest;
use context_graph::{FileTags, RankedTags, RelevanceRanker, SymbolIndex};
use context_tags::{Tag, TagKind};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Chooses which tags a map shows, and in what order
pub trait TagSelector: Send + Sync {
    /// Strategy name as typed on the command line
    fn name(&self) -> &'static str;

    fn select_tags(&self, ctx: &MapContext, request: &MapRequest) -> Result<Vec<Tag>>;
}

/// Every definition in every file, ordered by path then line
#[derive(Debug, Default, Clone, Copy)]
pub struct FullMap;

impl FullMap {
    /// Definitions per (file, identifier), deduplicated and sorted. A file
    /// with references but no definitions contributes its references so it
    /// still gets a header.
    pub fn tags_from_files(files: &[FileTags]) -> Vec<Tag> {
        let index = SymbolIndex::from_files(files);
        let mut tags: Vec<Tag> = index
            .definition_sets()
            .flat_map(|(_, defs)| defs.iter().cloned())
            .collect();

        for file in files {
            let has_definition = file.tags.iter().any(|t| t.kind == TagKind::Definition);
            if !has_definition && !file.tags.is_empty() {
                let refs: BTreeSet<&Tag> = file.tags.iter().collect();
                tags.extend(refs.into_iter().cloned());
            }
        }

        tags.sort();
        tags
    }
}

impl TagSelector for FullMap {
    fn name(&self) -> &'static str {
        StrategyKind::FullMap.as_str()
    }

    fn select_tags(&self, ctx: &MapContext, request: &MapRequest) -> Result<Vec<Tag>> {
        let files = ctx.collect_tags(request)?;
        Ok(Self::tags_from_files(&files))
    }
}

/// Definitions ranked by personalized PageRank over the symbol graph
#[derive(Debug, Default, Clone, Copy)]
pub struct RepoMap;

impl RepoMap {
    /// Ranked definitions, placeholders and scores, kept apart
    pub fn ranked_tags(&self, ctx: &MapContext, request: &MapRequest) -> Result<RankedTags> {
        let ranker = RelevanceRanker::new(ctx.config().ranking.clone())?;
        let files = ctx.collect_tags(request)?;
        Ok(ranker.rank(&files, &request.mentioned_files, &request.mentioned_idents))
    }
}

impl TagSelector for RepoMap {
    fn name(&self) -> &'static str {
        StrategyKind::RepoMap.as_str()
    }

    fn select_tags(&self, ctx: &MapContext, request: &MapRequest) -> Result<Vec<Tag>> {
        Ok(self.ranked_tags(ctx, request)?.into_tags())
    }
}

/// Map strategy selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    FullMap,
    RepoMap,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 2] = [StrategyKind::FullMap, StrategyKind::RepoMap];

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::FullMap => "fullmap",
            StrategyKind::RepoMap => "repomap",
        }
    }

    /// Quoted, comma-separated strategy names
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|s| format!("'{}'", s.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn selector(self) -> Box<dyn TagSelector> {
        match self {
            StrategyKind::FullMap => Box::new(FullMap),
            StrategyKind::RepoMap => Box::new(RepoMap),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| MapError::UnknownStrategy(s.to_string()))
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tag(file: &str, line: usize, name: &str, kind: TagKind) -> Tag {
        Tag::new(file, format!("/r/{file}"), line, name, kind)
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("fullmap".parse::<StrategyKind>().unwrap(), StrategyKind::FullMap);
        assert_eq!("repomap".parse::<StrategyKind>().unwrap(), StrategyKind::RepoMap);

        let err = "bestmap".parse::<StrategyKind>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid strategy: bestmap. Available strategies are: 'fullmap', 'repomap'"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn test_selector_names() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.selector().name(), kind.as_str());
        }
    }

    #[test]
    fn test_full_map_orders_by_path_and_line() {
        use TagKind::*;
        let files = vec![
            FileTags::new(
                "b.py",
                "/r/b.py",
                vec![tag("b.py", 4, "late", Definition), tag("b.py", 1, "early", Definition)],
            ),
            FileTags::new(
                "a.py",
                "/r/a.py",
                vec![
                    tag("a.py", 0, "foo", Definition),
                    tag("a.py", 0, "foo", Definition),
                    tag("a.py", 2, "bar", Reference),
                ],
            ),
        ];
        let tags = FullMap::tags_from_files(&files);
        let order: Vec<_> = tags.iter().map(|t| (t.rel_fname.as_str(), t.line)).collect();
        assert_eq!(order, vec![("a.py", Some(0)), ("b.py", Some(1)), ("b.py", Some(4))]);
    }

    #[test]
    fn test_full_map_keeps_reference_only_files() {
        use TagKind::*;
        let files = vec![
            FileTags::new("a.py", "/r/a.py", vec![tag("a.py", 0, "foo", Definition)]),
            FileTags::new(
                "b.py",
                "/r/b.py",
                vec![tag("b.py", 2, "foo", Reference), tag("b.py", 2, "foo", Reference)],
            ),
            FileTags::new("c.txt", "/r/c.txt", vec![]),
        ];
        let tags = FullMap::tags_from_files(&files);
        let summary: Vec<_> = tags
            .iter()
            .map(|t| (t.rel_fname.as_str(), t.kind))
            .collect();
        assert_eq!(summary, vec![("a.py", Definition), ("b.py", Reference)]);
    }
}
