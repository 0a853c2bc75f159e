use crate::error::Result;
use crate::language::Language;
use crate::queries::{QuerySet, TagQuery};
use crate::text::read_text;
use crate::types::Tag;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, QueryCursor};

/// Extracts definition and reference tags from source files.
///
/// Holds only compiled queries, so one extractor can be shared across
/// threads; every call builds its own parser.
pub struct TagExtractor {
    queries: QuerySet,
}

impl TagExtractor {
    /// Extractor using the bundled queries
    pub fn new() -> Self {
        Self {
            queries: QuerySet::bundled(),
        }
    }

    /// Extractor whose queries may be overridden from `dir`
    pub fn with_query_dir(dir: &Path) -> Result<Self> {
        Ok(Self {
            queries: QuerySet::with_overrides(dir)?,
        })
    }

    pub fn queries(&self) -> &QuerySet {
        &self.queries
    }

    /// Extract tags from the file at `fname`.
    ///
    /// Unknown languages, missing queries and files that are missing,
    /// unreadable, binary or empty all produce an empty list.
    pub fn extract(&self, fname: &Path, rel_fname: &str) -> Vec<Tag> {
        let language = Language::from_path(fname);
        let Some(query) = self.queries.get(language) else {
            log::debug!("No tags query for {} ({})", rel_fname, language);
            return Vec::new();
        };
        if !fname.exists() {
            log::debug!("Skipping missing file {}", fname.display());
            return Vec::new();
        }
        let Some(source) = read_text(fname) else {
            return Vec::new();
        };
        if source.is_empty() {
            return Vec::new();
        }
        Self::run_query(query, &source, fname, rel_fname)
    }

    /// Extract tags from in-memory source text
    pub fn extract_source(
        &self,
        source: &str,
        language: Language,
        fname: &Path,
        rel_fname: &str,
    ) -> Vec<Tag> {
        match self.queries.get(language) {
            Some(query) if !source.is_empty() => Self::run_query(query, source, fname, rel_fname),
            _ => Vec::new(),
        }
    }

    fn run_query(query: &TagQuery, source: &str, fname: &Path, rel_fname: &str) -> Vec<Tag> {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(query.grammar()) {
            log::warn!("Failed to load {} grammar: {}", query.language(), e);
            return Vec::new();
        }
        let Some(tree) = parser.parse(source, None) else {
            log::debug!("Parser produced no tree for {}", rel_fname);
            return Vec::new();
        };

        let bytes = source.as_bytes();
        let mut tags = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut captures = cursor.captures(query.query(), tree.root_node(), bytes);
        while let Some((m, index)) = captures.next() {
            let capture = m.captures[*index];
            let Some(kind) = query.kind_of(capture.index) else {
                continue;
            };
            let Ok(name) = capture.node.utf8_text(bytes) else {
                continue;
            };
            tags.push(Tag::new(
                rel_fname,
                fname,
                capture.node.start_position().row,
                name,
                kind,
            ));
        }

        log::debug!("Extracted {} tags from {}", tags.len(), rel_fname);
        tags
    }
}

impl Default for TagExtractor {
    fn default() -> Self {
        Self::new()
    }
}
