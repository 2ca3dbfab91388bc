//! Logging errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file {path}: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install the global subscriber: {0}")]
    Init(String),

    #[error("Failed to change log level: {0}")]
    Reload(String),
}

pub type Result<T> = std::result::Result<T, LoggingError>;
