//! Error types for the ado command bar.

use std::time::Duration;
use thiserror::Error;

/// Query Engine errors - rendered inline by the command bar.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Script raised an error or returned the wrong type.
    #[error("script error: {0}")]
    Script(String),

    /// Engine call did not finish in time.
    #[error("engine timeout after {duration:?}")]
    Timeout { duration: Duration },

    /// Engine runtime unavailable (e.g., its thread is gone).
    #[error("engine runtime unavailable")]
    RuntimeUnavailable,

    /// Engine returned something that is not a valid result.
    #[error("invalid engine response: {0}")]
    InvalidResponse(String),

    /// Engine had no answer (e.g., empty search for a lucky lookup).
    #[error("nothing found for '{0}'")]
    NotFound(String),
}

/// Errors decoding response payloads.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Payload is not valid JSON or does not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}
