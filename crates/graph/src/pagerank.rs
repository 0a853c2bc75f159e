//! Personalized PageRank by power iteration.
//!
//! Mirrors the classic weighted formulation: each node's out-edges are
//! normalized to a stochastic row, mass held by dangling nodes is spread by
//! the dangling distribution, and the teleport term follows the
//! personalization vector. Each iteration pulls from the previous iterate,
//! so node updates run in parallel without changing the result.

use crate::config::RankingConfig;
use crate::types::SymbolGraph;
use petgraph::graph::NodeIndex;
use rayon::prelude::*;
use std::collections::HashMap;

/// Outcome of a PageRank run
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankScores {
    /// Score per node, indexed by `NodeIndex::index()`
    pub scores: Vec<f64>,

    /// Iterations performed
    pub iterations: usize,

    /// Whether the tolerance was reached before the iteration cap
    pub converged: bool,
}

impl PageRankScores {
    pub fn get(&self, idx: NodeIndex) -> f64 {
        self.scores.get(idx.index()).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

pub struct PageRank {
    damping: f64,
    max_iterations: usize,
    tolerance: f64,
}

impl PageRank {
    pub fn new(config: &RankingConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
        }
    }

    /// Rank the graph's nodes.
    ///
    /// `personalization` maps relative paths to positive weights. Entries
    /// for files outside the graph are ignored; when nothing remains the
    /// teleport and dangling distributions are uniform.
    pub fn compute(
        &self,
        graph: &SymbolGraph,
        personalization: &HashMap<String, f64>,
    ) -> PageRankScores {
        let n = graph.node_count();
        if n == 0 {
            return PageRankScores {
                scores: Vec::new(),
                iterations: 0,
                converged: true,
            };
        }

        let teleport = teleport_vector(graph, personalization);

        // Incoming (source, normalized weight) lists; parallel edges stay separate
        let out_weights: Vec<f64> = graph.nodes().map(|(idx, _)| graph.out_weight(idx)).collect();
        let incoming: Vec<Vec<(usize, f64)>> = graph
            .nodes()
            .map(|(idx, _)| {
                graph
                    .in_edges(idx)
                    .map(|(src, edge)| (src.index(), edge.weight / out_weights[src.index()]))
                    .collect()
            })
            .collect();
        let dangling: Vec<usize> = (0..n).filter(|&i| out_weights[i] == 0.0).collect();

        let alpha = self.damping;
        let mut x = vec![1.0 / n as f64; n];
        for iteration in 1..=self.max_iterations {
            let danglesum = alpha * dangling.iter().map(|&i| x[i]).sum::<f64>();
            let next: Vec<f64> = (0..n)
                .into_par_iter()
                .map(|i| {
                    let pulled: f64 = incoming[i].iter().map(|&(src, w)| x[src] * w).sum();
                    alpha * pulled + danglesum * teleport[i] + (1.0 - alpha) * teleport[i]
                })
                .collect();

            let err: f64 = next.iter().zip(&x).map(|(a, b)| (a - b).abs()).sum();
            x = next;
            if err < n as f64 * self.tolerance {
                log::debug!("PageRank converged after {} iterations", iteration);
                return PageRankScores {
                    scores: x,
                    iterations: iteration,
                    converged: true,
                };
            }
        }

        log::warn!(
            "PageRank did not converge within {} iterations; using last iterate",
            self.max_iterations
        );
        PageRankScores {
            scores: x,
            iterations: self.max_iterations,
            converged: false,
        }
    }
}

/// Normalized personalization over graph nodes, uniform when empty
fn teleport_vector(graph: &SymbolGraph, personalization: &HashMap<String, f64>) -> Vec<f64> {
    let n = graph.node_count();
    let raw: Vec<f64> = graph
        .nodes()
        .map(|(_, file)| personalization.get(file).copied().unwrap_or(0.0).max(0.0))
        .collect();
    let total: f64 = raw.iter().sum();
    if total > 0.0 {
        raw.into_iter().map(|w| w / total).collect()
    } else {
        if !personalization.is_empty() {
            log::debug!("No personalized file is a graph node; using uniform teleport");
        }
        vec![1.0 / n as f64; n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SymbolEdge;
    use proptest::prelude::*;

    fn edge(ident: &str, weight: f64) -> SymbolEdge {
        SymbolEdge {
            ident: ident.to_string(),
            weight,
        }
    }

    fn rank(graph: &SymbolGraph, personalization: &HashMap<String, f64>) -> HashMap<String, f64> {
        let scores = PageRank::new(&RankingConfig::default()).compute(graph, personalization);
        assert!(scores.converged);
        graph
            .nodes()
            .map(|(idx, file)| (file.to_string(), scores.get(idx)))
            .collect()
    }

    #[test]
    fn test_empty_graph() {
        let scores = PageRank::new(&RankingConfig::default()).compute(&SymbolGraph::new(), &HashMap::new());
        assert!(scores.is_empty());
        assert!(scores.converged);
    }

    #[test]
    fn test_simple_pagerank() {
        // b -> a, a dangling: x_b = 0.5 / 1.425
        let mut graph = SymbolGraph::new();
        graph.add_edge("b.py", "a.py", edge("foo", 1.0));
        let ranks = rank(&graph, &HashMap::new());

        assert!((ranks["b.py"] - 0.5 / 1.425).abs() < 1e-4);
        assert!((ranks["a.py"] - (1.0 - 0.5 / 1.425)).abs() < 1e-4);
    }

    #[test]
    fn test_cycle_is_uniform() {
        let mut graph = SymbolGraph::new();
        graph.add_edge("a", "b", edge("x", 1.0));
        graph.add_edge("b", "c", edge("y", 1.0));
        graph.add_edge("c", "a", edge("z", 1.0));
        let ranks = rank(&graph, &HashMap::new());
        for score in ranks.values() {
            assert!((score - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_parallel_edges_add_up() {
        // Two unit edges to a and one to b: a receives twice b's share
        let mut graph = SymbolGraph::new();
        graph.add_edge("src", "a", edge("x", 1.0));
        graph.add_edge("src", "a", edge("y", 1.0));
        graph.add_edge("src", "b", edge("z", 1.0));
        let ranks = rank(&graph, &HashMap::new());
        assert!(ranks["a"] > ranks["b"]);
    }

    #[test]
    fn test_personalization_biases_rank() {
        let mut graph = SymbolGraph::new();
        graph.add_edge("a", "b", edge("x", 1.0));
        graph.add_edge("b", "a", edge("y", 1.0));
        graph.add_edge("c", "a", edge("z", 1.0));
        graph.add_edge("c", "b", edge("w", 1.0));

        let plain = rank(&graph, &HashMap::new());
        let personalized = rank(&graph, &HashMap::from([("c".to_string(), 50.0)]));
        assert!(personalized["c"] > plain["c"]);
    }

    #[test]
    fn test_personalization_outside_graph_falls_back_to_uniform() {
        let mut graph = SymbolGraph::new();
        graph.add_edge("b.py", "a.py", edge("foo", 1.0));
        let plain = rank(&graph, &HashMap::new());
        let stray = rank(&graph, &HashMap::from([("zzz.py".to_string(), 50.0)]));
        assert_eq!(plain, stray);
    }

    #[test]
    fn test_iteration_cap_returns_last_iterate() {
        let mut graph = SymbolGraph::new();
        graph.add_edge("b.py", "a.py", edge("foo", 1.0));
        let config = RankingConfig {
            max_iterations: 1,
            tolerance: 1e-12,
            ..RankingConfig::default()
        };
        let scores = PageRank::new(&config).compute(&graph, &HashMap::new());
        assert!(!scores.converged);
        assert_eq!(scores.iterations, 1);
        assert!((scores.scores.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_rank_mass_is_conserved(edges in prop::collection::vec((0u8..6, 0u8..6, 1u8..5), 1..20)) {
            let mut graph = SymbolGraph::new();
            for (i, (from, to, weight)) in edges.iter().enumerate() {
                graph.add_edge(&format!("f{from}"), &format!("f{to}"), edge(&format!("s{i}"), *weight as f64));
            }
            let scores = PageRank::new(&RankingConfig::default()).compute(&graph, &HashMap::new());
            let total: f64 = scores.scores.iter().sum();
            prop_assert!((total - 1.0).abs() < 1e-6);
            prop_assert!(scores.scores.iter().all(|s| *s >= 0.0));
        }
    }
}
