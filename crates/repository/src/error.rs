//! Repository errors

use thiserror::Error;

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// A loader was called before `initialize()`
    #[error("Repository not initialized. Call initialize() first.")]
    NotInitialized,

    /// The identity provider rejected or failed a call
    #[error("Identity provider error: {message}")]
    Provider { message: String },
}

impl RepositoryError {
    pub fn provider(message: impl Into<String>) -> Self {
        RepositoryError::Provider {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
