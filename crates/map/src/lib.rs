//! # Context Map
//!
//! Compact, syntax-aware maps of a git repository for prompt context.
//!
//! ## Pipeline
//!
//! ```text
//! MapContext::open(root)
//!     │
//!     ├──> Tracked files (HEAD tree, dir prefix, depth)
//!     ├──> Tag extraction (tree-sitter, rayon over files)
//!     │
//!     ├──> TagSelector
//!     │      ├─ fullmap: every definition, by path then line
//!     │      └─ repomap: definitions ranked by personalized PageRank,
//!     │                  then placeholders for the remaining files
//!     │
//!     └──> MapAssembler
//!            ├─ "<path>:" header + TreeContext rendering per file
//!            └─ every line cut to 150 characters
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use context_map::{MapConfig, MapContext, MapRequest, StrategyKind};
//!
//! # fn main() -> context_map::Result<()> {
//! let root = std::path::Path::new("/path/to/repo");
//! let ctx = MapContext::open(root, MapConfig::for_root(root)?)?;
//! let request = MapRequest::new().mention_ident("parse");
//! let selector = StrategyKind::RepoMap.selector();
//! println!("{}", ctx.map(selector.as_ref(), &request)?);
//! # Ok(())
//! # }
//! ```

mod assembler;
mod config;
mod context;
mod error;
mod request;
mod strategy;
mod tokens;

pub use assembler::{truncate_lines, MapAssembler};
pub use config::{MapConfig, CONFIG_FILE_NAME};
pub use context::MapContext;
pub use error::{MapError, Result};
pub use request::MapRequest;
pub use strategy::{FullMap, RepoMap, StrategyKind, TagSelector};
pub use tokens::{TiktokenCounter, TokenCounter};

pub use context_graph::{RankedTags, RankingConfig, ScoredSymbol};
pub use context_render::ContextConfig;
pub use context_tags::{Tag, TagKind};
