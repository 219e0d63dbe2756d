use thiserror::Error;

/// Unified error type for gitver operations
#[derive(Error, Debug)]
pub enum GitverError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("the current branch has no commits")]
    UnbornHead,

    #[error("Invalid version: {0}")]
    Version(String),

    #[error("Invalid build metadata: {0}")]
    BuildMetadata(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results in gitver
pub type Result<T> = std::result::Result<T, GitverError>;

impl GitverError {
    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitverError::Version(msg.into())
    }

    /// Create a build metadata error with context
    pub fn build_metadata(msg: impl Into<String>) -> Self {
        GitverError::BuildMetadata(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitverError::Config(msg.into())
    }

    /// Whether this error was caused by invalid caller-supplied configuration
    /// rather than by the repository itself.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GitverError::Version(_) | GitverError::BuildMetadata(_) | GitverError::Config(_)
        )
    }
}
