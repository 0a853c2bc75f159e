use std::collections::HashSet;

/// What to map and what to emphasize
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapRequest {
    /// Keep files with at most this many path segments
    pub depth: Option<usize>,

    /// Keep files under this directory, relative to the root
    pub dir: Option<String>,

    /// Relative paths that bias the ranking toward themselves
    pub mentioned_files: HashSet<String>,

    /// Identifiers whose references weigh ten times as much
    pub mentioned_idents: HashSet<String>,
}

impl MapRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn mention_file(mut self, rel_fname: impl Into<String>) -> Self {
        self.mentioned_files.insert(rel_fname.into());
        self
    }

    pub fn mention_ident(mut self, ident: impl Into<String>) -> Self {
        self.mentioned_idents.insert(ident.into());
        self
    }
}
