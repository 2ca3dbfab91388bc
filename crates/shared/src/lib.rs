//! # IAM Console Shared
//!
//! Common types used across all IAM Console packages: the identity records
//! shown in the UI, log levels, configuration and errors.

pub mod config;
pub mod error;
pub mod level;
pub mod model;
pub mod statement;

// Re-exports
pub use config::*;
pub use error::*;
pub use level::*;
pub use model::*;
pub use statement::*;
