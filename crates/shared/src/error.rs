//! Error types for IAM Console

use thiserror::Error;

/// Error thrown when an unknown log level name is parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown log level '{name}'. Expected one of: {}", expected.join(", "))]
pub struct UnknownLevelError {
    pub name: String,
    pub expected: Vec<String>,
}

/// Error thrown when an unknown record kind is parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown record kind '{0}'. Expected one of: users, groups, policies")]
pub struct UnknownKindError(pub String);

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
