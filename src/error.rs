//! Custom error types for monotag with an explicit recoverable/fatal split.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for monotag operations.
#[derive(Error, Debug)]
pub enum MonotagError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "unable to locate repository root: no .git entry found between {} and the filesystem root",
        .start.display()
    )]
    RepoRootNotFound { start: PathBuf },

    // Git errors
    #[error("Git operation failed: {0}")]
    GitError(String),

    // Network/API errors
    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    // Version/parsing errors - automatic conversions via #[from]
    #[error("Invalid version format: {0}")]
    InvalidVersion(#[from] semver::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using MonotagError
pub type Result<T> = std::result::Result<T, MonotagError>;

impl MonotagError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a git error with context
    pub fn git(msg: impl Into<String>) -> Self {
        Self::GitError(msg.into())
    }

    /// Recoverable errors mark the run as failed but must not stop
    /// processing of remaining modules. Everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ForgeError(_))
    }
}

// Implement From for std::io::Error - wraps in Other variant for generic I/O errors
impl From<std::io::Error> for MonotagError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for MonotagError {
    fn from(err: octocrab::Error) -> Self {
        Self::forge(format!("GitHub API error: {}", err))
    }
}
