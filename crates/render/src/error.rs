use thiserror::Error;

/// Result type for rendering
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while rendering a file excerpt
#[derive(Error, Debug)]
pub enum RenderError {
    /// No grammar for the file's language
    #[error("Unknown language for {0}")]
    UnsupportedLanguage(String),

    /// Tree-sitter failed to produce a tree
    #[error("Failed to parse {0}")]
    Parse(String),
}
