use crate::config::RankingConfig;
use crate::index::SymbolIndex;
use crate::types::{SymbolEdge, SymbolGraph};
use std::collections::HashSet;

/// Builds the file-level symbol graph from a [`SymbolIndex`]
pub struct GraphBuilder<'a> {
    config: &'a RankingConfig,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(config: &'a RankingConfig) -> Self {
        Self { config }
    }

    /// One edge per (referencing file, defining file, identifier) for every
    /// identifier that is both defined and referenced.
    pub fn build(&self, index: &SymbolIndex, mentioned_idents: &HashSet<String>) -> SymbolGraph {
        let mut graph = SymbolGraph::new();

        for ident in index.shared_identifiers() {
            let Some(defining_files) = index.defining_files(ident) else {
                continue;
            };
            let multiplier = if mentioned_idents.contains(ident) {
                self.config.mentioned_ident_boost
            } else {
                1.0
            };

            for (referencing_file, count) in index.reference_counts(ident) {
                let weight = reference_weight(count) * multiplier;
                for defining_file in defining_files {
                    graph.add_edge(
                        referencing_file,
                        defining_file,
                        SymbolEdge {
                            ident: ident.to_string(),
                            weight,
                        },
                    );
                }
            }
        }

        log::info!(
            "Built symbol graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        graph
    }
}

/// Damped reference count: floor(sqrt(count))
pub fn reference_weight(count: usize) -> f64 {
    (count as f64).sqrt().floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::FileTags;
    use context_tags::{Tag, TagKind};

    fn file(name: &str, tags: &[(&str, TagKind)]) -> FileTags {
        let tags = tags
            .iter()
            .enumerate()
            .map(|(line, (ident, kind))| Tag::new(name, format!("/r/{name}"), line, *ident, *kind))
            .collect();
        FileTags::new(name, format!("/r/{name}"), tags)
    }

    #[test]
    fn test_reference_weight() {
        assert_eq!(reference_weight(1), 1.0);
        assert_eq!(reference_weight(3), 1.0);
        assert_eq!(reference_weight(4), 2.0);
        assert_eq!(reference_weight(15), 3.0);
    }

    #[test]
    fn test_edges_per_identifier_and_defining_file() {
        use TagKind::*;
        let files = vec![
            file("a.py", &[("foo", Definition), ("bar", Definition)]),
            file("b.py", &[("foo", Definition)]),
            file(
                "c.py",
                &[
                    ("foo", Reference),
                    ("foo", Reference),
                    ("foo", Reference),
                    ("foo", Reference),
                    ("bar", Reference),
                    ("orphan", Reference),
                ],
            ),
            file("d.py", &[("unused", Definition)]),
        ];
        let index = SymbolIndex::from_files(&files);
        let config = RankingConfig::default();
        let mentioned: HashSet<String> = ["bar".to_string()].into_iter().collect();
        let graph = GraphBuilder::new(&config).build(&index, &mentioned);

        // d.py has no edge and is not a node
        assert_eq!(graph.node_count(), 3);
        assert!(graph.find_node("d.py").is_none());
        assert_eq!(graph.edge_count(), 3);

        let c = graph.find_node("c.py").unwrap();
        let mut edges: Vec<_> = graph
            .out_edges(c)
            .map(|(dst, e)| (graph.file(dst).to_string(), e.ident.clone(), e.weight))
            .collect();
        edges.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        assert_eq!(
            edges,
            vec![
                ("a.py".to_string(), "bar".to_string(), 10.0),
                ("a.py".to_string(), "foo".to_string(), 2.0),
                ("b.py".to_string(), "foo".to_string(), 2.0),
            ]
        );
    }

    #[test]
    fn test_no_shared_identifiers_gives_empty_graph() {
        use TagKind::*;
        let files = vec![
            file("a.py", &[("foo", Definition)]),
            file("b.py", &[("bar", Definition)]),
        ];
        let index = SymbolIndex::from_files(&files);
        let config = RankingConfig::default();
        let graph = GraphBuilder::new(&config).build(&index, &HashSet::new());
        assert!(graph.is_empty());
    }
}
