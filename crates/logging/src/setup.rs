//! Global subscriber wiring and runtime level control

use shared::{LogLevel, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Layer, Registry};

use crate::console::{ConsoleBuffer, ConsoleLayer};
use crate::error::{LoggingError, Result};
use crate::format::FileFormat;
use crate::rotating::RotatingFileWriter;

/// Targets of this application's own crates
pub const APP_TARGETS: &[&str] = &["iam_console", "cli", "repository", "shared", "logging"];

/// Targets an identity SDK integration logs under
pub const SDK_TARGETS: &[&str] = &[
    "oci",
    "oci::identity",
    "oci::identity_domains",
    "oci::generative_ai_inference",
];

/// Map a console level onto a `tracing` filter
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warning => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
    }
}

/// Filter applying `level` to the app and SDK targets, WARN to everything else
pub fn targets_for(level: LogLevel) -> Targets {
    let filter = level_filter(level);
    Targets::new()
        .with_default(LevelFilter::WARN)
        .with_targets(
            APP_TARGETS
                .iter()
                .chain(SDK_TARGETS.iter())
                .map(|target| (*target, filter)),
        )
}

/// Owner of the installed log sinks.
///
/// Dropping it flushes the file writer, so keep it alive for the whole run.
pub struct LoggingHandle {
    console: ConsoleBuffer,
    level: LogLevel,
    reload: Option<reload::Handle<Targets, Registry>>,
    _guard: Option<WorkerGuard>,
}

impl LoggingHandle {
    /// A handle not attached to any subscriber; level changes are only recorded
    pub fn detached(console: ConsoleBuffer, level: LogLevel) -> Self {
        Self {
            console,
            level,
            reload: None,
            _guard: None,
        }
    }

    /// Buffer the console panel reads from
    pub fn console(&self) -> &ConsoleBuffer {
        &self.console
    }

    /// Level currently applied to the app and SDK targets
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Apply `level` to the app and SDK targets
    pub fn set_level(&mut self, level: LogLevel) -> Result<()> {
        if let Some(handle) = &self.reload {
            handle
                .reload(targets_for(level))
                .map_err(|e| LoggingError::Reload(e.to_string()))?;
        }
        self.level = level;
        Ok(())
    }
}

impl std::fmt::Debug for LoggingHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingHandle")
            .field("level", &self.level)
            .field("console_entries", &self.console.len())
            .field("attached", &self.reload.is_some())
            .finish()
    }
}

/// Install the global subscriber: rotating file, UI console and, when
/// `stderr` is set, a human-readable stderr stream filtered by `RUST_LOG`.
pub fn init(config: &LoggingConfig, stderr: bool) -> Result<LoggingHandle> {
    let path = config.file_path();
    let writer = RotatingFileWriter::open(&path, config.max_bytes, config.backup_count).map_err(
        |source| LoggingError::OpenFile {
            path: path.display().to_string(),
            source,
        },
    )?;
    let (file_writer, guard) = tracing_appender::non_blocking(writer);

    let console = ConsoleBuffer::new(config.console_capacity);
    let (filter, reload_handle) = reload::Layer::new(targets_for(config.level));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(file_writer)
        .event_format(FileFormat);

    let stderr_layer = stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(ConsoleLayer::new(console.clone()))
        .with(stderr_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::info!("Logger initialized with UI and rotating file handlers.");

    Ok(LoggingHandle {
        console,
        level: config.level,
        reload: Some(reload_handle),
        _guard: Some(guard),
    })
}
