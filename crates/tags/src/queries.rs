use crate::error::{Result, TagError};
use crate::language::Language;
use crate::types::TagKind;
use std::collections::HashMap;
use std::path::Path;
use tree_sitter::Query;

const RUST_TAGS: &str = include_str!("../queries/tree-sitter-rust-tags.scm");
const PYTHON_TAGS: &str = include_str!("../queries/tree-sitter-python-tags.scm");
const JAVASCRIPT_TAGS: &str = include_str!("../queries/tree-sitter-javascript-tags.scm");
const TYPESCRIPT_TAGS: &str = include_str!("../queries/tree-sitter-typescript-tags.scm");
const GO_TAGS: &str = include_str!("../queries/tree-sitter-go-tags.scm");
const JAVA_TAGS: &str = include_str!("../queries/tree-sitter-java-tags.scm");

/// Bundled tags query source for a language, if any
pub fn bundled_query(language: Language) -> Option<&'static str> {
    match language.query_id() {
        "rust" => Some(RUST_TAGS),
        "python" => Some(PYTHON_TAGS),
        "javascript" => Some(JAVASCRIPT_TAGS),
        "typescript" => Some(TYPESCRIPT_TAGS),
        "go" => Some(GO_TAGS),
        "java" => Some(JAVA_TAGS),
        _ => None,
    }
}

/// File name of the tags query resource for a language
pub fn query_file_name(language: Language) -> String {
    format!("tree-sitter-{}-tags.scm", language.query_id())
}

/// A tags query compiled against its grammar
pub struct TagQuery {
    language: Language,
    grammar: tree_sitter::Language,
    query: Query,
    /// Tag kind per capture index; `None` for captures that are not tags
    kinds: Vec<Option<TagKind>>,
}

impl TagQuery {
    /// Compile `source` for `language`
    pub fn compile(language: Language, source: &str) -> Result<Self> {
        let grammar = language.tree_sitter_language()?;
        let query = Query::new(&grammar, source)
            .map_err(|e| TagError::query(language.as_str(), e.to_string()))?;
        let kinds = query
            .capture_names()
            .iter()
            .map(|name| TagKind::from_capture_name(name))
            .collect();
        Ok(Self {
            language,
            grammar,
            query,
            kinds,
        })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn grammar(&self) -> &tree_sitter::Language {
        &self.grammar
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Tag kind of the capture at `index`
    pub fn kind_of(&self, index: u32) -> Option<TagKind> {
        self.kinds.get(index as usize).copied().flatten()
    }
}

/// Compiled tags queries keyed by language.
///
/// A language without an entry yields no tags.
#[derive(Default)]
pub struct QuerySet {
    queries: HashMap<Language, TagQuery>,
}

impl QuerySet {
    /// Compile every bundled query
    pub fn bundled() -> Self {
        let mut set = Self::default();
        for language in Language::WITH_TAGS {
            if let Some(source) = bundled_query(language) {
                set.insert_or_warn(language, source);
            }
        }
        set
    }

    /// Compile bundled queries, preferring `tree-sitter-<id>-tags.scm` files
    /// found in `dir`
    pub fn with_overrides(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(TagError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("query directory {} does not exist", dir.display()),
            )));
        }

        let mut set = Self::default();
        for language in Language::WITH_TAGS {
            let path = dir.join(query_file_name(language));
            if path.is_file() {
                let source = std::fs::read_to_string(&path)?;
                log::debug!("Using {} query from {}", language, path.display());
                set.insert_or_warn(language, &source);
            } else if let Some(source) = bundled_query(language) {
                set.insert_or_warn(language, source);
            }
        }
        Ok(set)
    }

    fn insert_or_warn(&mut self, language: Language, source: &str) {
        match TagQuery::compile(language, source) {
            Ok(query) => {
                self.queries.insert(language, query);
            }
            Err(e) => log::warn!("{}; {} files will yield no tags", e, language),
        }
    }

    pub fn get(&self, language: Language) -> Option<&TagQuery> {
        self.queries.get(&language)
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
