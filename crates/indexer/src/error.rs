use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Repository root must be an absolute path: {0}")]
    RootNotAbsolute(PathBuf),

    #[error("Could not find git repository at {root}: {source}")]
    RepositoryNotFound {
        root: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Path {0} is outside the repository root")]
    OutsideRoot(PathBuf),
}

impl IndexerError {
    /// Errors caused by how the run was configured rather than by repository
    /// contents; these abort the run
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            IndexerError::RootNotAbsolute(_) | IndexerError::RepositoryNotFound { .. }
        )
    }
}
