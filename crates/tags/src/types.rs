use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name given to placeholder tags
pub const PLACEHOLDER_NAME: &str = "<no symbols>";

/// Whether a tag defines or uses its symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Definition,
    Reference,
}

impl TagKind {
    /// Classify a query capture name.
    ///
    /// `name.definition.*` captures are definitions, `name.reference.*`
    /// captures are references, anything else is not a tag.
    pub fn from_capture_name(capture: &str) -> Option<Self> {
        if capture.starts_with("name.definition.") {
            Some(TagKind::Definition)
        } else if capture.starts_with("name.reference.") {
            Some(TagKind::Reference)
        } else {
            None
        }
    }
}

/// One occurrence of a symbol in a file
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag {
    /// Path relative to the repository root, `/`-separated
    pub rel_fname: String,

    /// Absolute path on disk
    pub fname: PathBuf,

    /// Zero-based start line; `None` for placeholders
    pub line: Option<usize>,

    /// Identifier text exactly as written in the source
    pub name: String,

    pub kind: TagKind,
}

impl Tag {
    pub fn new(
        rel_fname: impl Into<String>,
        fname: impl Into<PathBuf>,
        line: usize,
        name: impl Into<String>,
        kind: TagKind,
    ) -> Self {
        Self {
            rel_fname: rel_fname.into(),
            fname: fname.into(),
            line: Some(line),
            name: name.into(),
            kind,
        }
    }

    /// Synthetic definition standing in for a file with nothing to show
    pub fn placeholder(rel_fname: impl Into<String>, fname: impl AsRef<Path>) -> Self {
        Self {
            rel_fname: rel_fname.into(),
            fname: fname.as_ref().to_path_buf(),
            line: None,
            name: PLACEHOLDER_NAME.to_string(),
            kind: TagKind::Definition,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.line.is_none()
    }

    pub fn is_definition(&self) -> bool {
        self.kind == TagKind::Definition
    }
}
