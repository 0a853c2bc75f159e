//! # Context Indexer
//!
//! Source enumeration for repository maps.
//!
//! ## Pipeline
//!
//! ```text
//! Repository root (absolute)
//!     │
//!     ├──> TrackedFiles (libgit2, HEAD tree)
//!     │      ├─> blobs only
//!     │      ├─> optional directory prefix
//!     │      └─> optional depth limit
//!     │
//!     └──> PathResolver
//!            └─> absolute ⇄ relative paths
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use context_indexer::TrackedFiles;
//!
//! let tracked = TrackedFiles::open("/path/to/project")?;
//! for path in tracked.list(Some("src"), Some(3))? {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), context_indexer::IndexerError>(())
//! ```

mod error;
mod paths;
mod scanner;

pub use error::{IndexerError, Result};
pub use paths::PathResolver;
pub use scanner::TrackedFiles;
