use std::path::PathBuf;
use thiserror::Error;

/// Surveyor error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Path exists but cannot be read: {0}")]
    PathNotAccessible(PathBuf),

    #[error("Analysis timed out after {elapsed_secs}s (budget: {budget_secs}s)")]
    Timeout {
        elapsed_secs: u64,
        budget_secs: u64,
    },

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Surveyor operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(elapsed_secs: u64, budget_secs: u64) -> Self {
        Error::Timeout {
            elapsed_secs,
            budget_secs,
        }
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Error::Store(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// True for the terminal analysis failures (not-found, not-accessible,
    /// timeout), as opposed to config or rendering problems.
    pub fn is_analysis_failure(&self) -> bool {
        matches!(
            self,
            Error::PathNotFound(_) | Error::PathNotAccessible(_) | Error::Timeout { .. }
        )
    }
}
