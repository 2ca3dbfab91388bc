//! # IAM Console CLI
//!
//! Terminal front-end for browsing a tenancy's IAM users, groups and policies.
//!
//! - `app` - UI state and key handling
//! - `ui` - ratatui rendering of that state
//! - `terminal` - raw-mode setup and the event loop
//! - `commands` - clap subcommands

pub mod app;
pub mod commands;
pub mod session;
pub mod settings;
pub mod terminal;
pub mod ui;

pub use app::{App, DetailView, Page};
pub use session::SessionToken;
pub use settings::{SettingsField, SettingsForm};
