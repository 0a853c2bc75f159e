//! # Context Tags
//!
//! Symbol tag extraction driven by tree-sitter tags queries.
//!
//! ## Architecture
//!
//! ```text
//! File path
//!     │
//!     ├──> Language Detection (from extension)
//!     │
//!     ├──> Query lookup (bundled or overridden tree-sitter-<lang>-tags.scm)
//!     │
//!     ├──> read_text (skips images, binary, unreadable files)
//!     │
//!     └──> Tree-sitter parse + capture query
//!          ├─> name.definition.* → TagKind::Definition
//!          ├─> name.reference.*  → TagKind::Reference
//!          └─> Emit Tag[] (relative path, absolute path, line, name, kind)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use context_tags::{Language, TagExtractor, TagKind};
//! use std::path::Path;
//!
//! let extractor = TagExtractor::new();
//! let tags = extractor.extract_source(
//!     "def greet():\n    pass\n",
//!     Language::Python,
//!     Path::new("/repo/app.py"),
//!     "app.py",
//! );
//! assert_eq!(tags[0].name, "greet");
//! assert_eq!(tags[0].kind, TagKind::Definition);
//! ```

mod error;
mod extractor;
mod language;
mod queries;
mod text;
mod types;

pub use error::{Result, TagError};
pub use extractor::TagExtractor;
pub use language::Language;
pub use queries::{bundled_query, query_file_name, QuerySet, TagQuery};
pub use text::{has_image_extension, read_text};
pub use types::{Tag, TagKind, PLACEHOLDER_NAME};
