use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Edge from a referencing file to a defining file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolEdge {
    /// Identifier the edge stands for
    pub ident: String,

    /// floor(sqrt(reference count)) times the mention boost
    pub weight: f64,
}

/// Directed multigraph of files linked by shared identifiers
pub struct SymbolGraph {
    /// File path nodes, one edge per (referencing file, defining file, identifier)
    pub graph: DiGraph<String, SymbolEdge>,

    /// Relative path -> NodeIndex mapping for fast lookup
    pub file_index: HashMap<String, NodeIndex>,
}

impl SymbolGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            file_index: HashMap::new(),
        }
    }

    /// Node for `rel_fname`, created on first use
    pub fn ensure_node(&mut self, rel_fname: &str) -> NodeIndex {
        if let Some(&idx) = self.file_index.get(rel_fname) {
            return idx;
        }
        let idx = self.graph.add_node(rel_fname.to_string());
        self.file_index.insert(rel_fname.to_string(), idx);
        idx
    }

    /// Add an edge, creating both endpoints as needed
    pub fn add_edge(&mut self, from: &str, to: &str, edge: SymbolEdge) {
        let from = self.ensure_node(from);
        let to = self.ensure_node(to);
        self.graph.add_edge(from, to, edge);
    }

    pub fn find_node(&self, rel_fname: &str) -> Option<NodeIndex> {
        self.file_index.get(rel_fname).copied()
    }

    /// Relative path of a node
    pub fn file(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &str)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx, self.graph[idx].as_str()))
    }

    /// Outgoing edges of a node as (target, edge) pairs
    pub fn out_edges(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, &SymbolEdge)> {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), e.weight()))
    }

    /// Incoming edges of a node as (source, edge) pairs
    pub fn in_edges(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, &SymbolEdge)> {
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| (e.source(), e.weight()))
    }

    /// Sum of outgoing edge weights
    pub fn out_weight(&self, idx: NodeIndex) -> f64 {
        self.out_edges(idx).map(|(_, edge)| edge.weight).sum()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl Default for SymbolGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(ident: &str, weight: f64) -> SymbolEdge {
        SymbolEdge {
            ident: ident.to_string(),
            weight,
        }
    }

    #[test]
    fn test_multi_edges_between_same_files() {
        let mut graph = SymbolGraph::new();
        graph.add_edge("b.py", "a.py", edge("foo", 1.0));
        graph.add_edge("b.py", "a.py", edge("bar", 2.0));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);

        let b = graph.find_node("b.py").unwrap();
        let a = graph.find_node("a.py").unwrap();
        assert_eq!(graph.out_weight(b), 3.0);
        assert_eq!(graph.out_weight(a), 0.0);
        assert_eq!(graph.in_edges(a).count(), 2);
        assert_eq!(graph.file(a), "a.py");
    }

    #[test]
    fn test_nodes_keep_insertion_order() {
        let mut graph = SymbolGraph::new();
        graph.add_edge("z.py", "a.py", edge("x", 1.0));
        graph.ensure_node("z.py");
        let files: Vec<_> = graph.nodes().map(|(_, f)| f).collect();
        assert_eq!(files, vec!["z.py", "a.py"]);
    }
}
