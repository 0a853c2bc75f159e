use thiserror::Error;

/// Result type for tag extraction
pub type Result<T> = std::result::Result<T, TagError>;

/// Errors raised while preparing grammars and queries.
///
/// Per-file problems (unknown language, unreadable or binary file) are not
/// errors; the extractor reports them as an empty tag list.
#[derive(Error, Debug)]
pub enum TagError {
    /// No grammar is bundled for the language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The tags query failed to compile against its grammar
    #[error("Invalid tags query for {language}: {message}")]
    Query { language: String, message: String },

    /// The grammar could not be loaded into a parser
    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),

    /// IO error while reading query overrides
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TagError {
    /// Create an unsupported language error
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }

    /// Create a query compilation error
    pub fn query(language: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Query {
            language: language.into(),
            message: message.into(),
        }
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitter(msg.into())
    }
}
