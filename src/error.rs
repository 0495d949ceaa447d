use std::io;
use thiserror::Error;

/// Errors that can occur while running the real git binary
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Git command failed: {0}")]
    CommandFailed(String),

    #[error("Failed to hand off to {path}: {source}")]
    ExecFailed {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Executable not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Errors that reach `main`
///
/// Only the hand-off to the real git and writing to the terminal surface
/// here. Configuration and telemetry failures degrade to a safe default
/// inside their modules.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for git operations
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;
