//! Error types for the page layer.

use thiserror::Error;

/// Failures outside the command bar itself: storage, setup, startup.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file {path} is corrupt: {message}")]
    CorruptStore { path: String, message: String },

    #[error("failed to serialize {0}")]
    Serialize(String),

    #[error("login required: {0}")]
    LoginRequired(String),
}
