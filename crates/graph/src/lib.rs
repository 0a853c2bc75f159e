//! # Context Graph
//!
//! File-level symbol graph and relevance ranking.
//!
//! ## Architecture
//!
//! ```text
//! FileTags[]
//!     │
//!     ├──> Symbol Index
//!     │      ├─ identifier → defining files
//!     │      ├─ identifier → referencing files (with counts)
//!     │      └─ (file, identifier) → definition tags
//!     │
//!     ├──> Graph Builder (petgraph)
//!     │      ├─ Nodes: files that define or reference a shared identifier
//!     │      └─ Edges: referencing file → defining file, one per identifier,
//!     │                weight = floor(sqrt(refs)) × mention boost
//!     │
//!     ├──> PageRank (personalized power iteration)
//!     │
//!     └──> Relevance Ranker
//!            ├─ Split each file's rank over its out-edges by weight
//!            ├─ Sort (file, identifier) by score, ties by path then name
//!            └─ Expand to definition tags + placeholders for silent files
//! ```

mod builder;
mod config;
mod error;
mod index;
mod pagerank;
mod ranker;
mod types;

pub use builder::{reference_weight, GraphBuilder};
pub use config::RankingConfig;
pub use error::{GraphError, Result};
pub use index::{FileTags, SymbolIndex};
pub use pagerank::{PageRank, PageRankScores};
pub use ranker::{RankedTags, RelevanceRanker, ScoredSymbol};
pub use types::{SymbolEdge, SymbolGraph};
