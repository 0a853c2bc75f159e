use crate::strategy::StrategyKind;
use thiserror::Error;

/// Result type for map operations
pub type Result<T> = std::result::Result<T, MapError>;

/// Errors that can occur while building a map
#[derive(Error, Debug)]
pub enum MapError {
    /// Enumerating the repository failed
    #[error(transparent)]
    Indexer(#[from] context_indexer::IndexerError),

    /// Ranking could not be set up
    #[error(transparent)]
    Graph(#[from] context_graph::GraphError),

    /// Tags queries could not be loaded
    #[error(transparent)]
    Tags(#[from] context_tags::TagError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Strategy name not recognised
    #[error("Invalid strategy: {0}. Available strategies are: {names}", names = StrategyKind::names())]
    UnknownStrategy(String),

    /// Token counting failed
    #[error("Token counting with model {model} failed: {message}")]
    Tokenizer { model: String, message: String },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MapError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether the error comes from how the run was set up; these abort
    /// before any file is read
    pub fn is_configuration(&self) -> bool {
        match self {
            MapError::Indexer(e) => e.is_configuration(),
            MapError::InvalidConfig(_) | MapError::UnknownStrategy(_) => true,
            _ => false,
        }
    }
}
