//! # IAM Console Logging
//!
//! Log sinks for the console:
//!
//! - `ConsoleBuffer` / `ConsoleLayer` - records shown in the UI console panel
//! - `RotatingFileWriter` - size-based rotation of `./logs/app.log`
//! - `FileFormat` - line layout of the log file
//! - `init` - wires everything into the global `tracing` subscriber and
//!   returns a `LoggingHandle` for runtime level changes

pub mod console;
pub mod error;
pub mod format;
pub mod rotating;
pub mod setup;

pub use console::{ConsoleBuffer, ConsoleLayer, LogEntry};
pub use error::{LoggingError, Result};
pub use format::FileFormat;
pub use rotating::RotatingFileWriter;
pub use setup::{init, level_filter, targets_for, LoggingHandle, APP_TARGETS, SDK_TARGETS};
