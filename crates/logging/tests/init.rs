use logging::LoggingError;
use shared::{LogLevel, LoggingConfig};
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> LoggingConfig {
    LoggingConfig {
        dir: dir.path().join("logs"),
        ..LoggingConfig::default()
    }
}

#[test]
fn test_init_writes_file_and_console() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let mut handle = logging::init(&config, false).unwrap();

    tracing::info!(target: "repository", "Loaded 2 users.");
    tracing::debug!(target: "repository", "hidden at INFO");
    tracing::info!(target: "hyper::client", "third-party chatter");
    tracing::warn!(target: "cli::app", "Failed login attempt.");

    handle.set_level(LogLevel::Debug).unwrap();
    tracing::debug!(target: "oci::identity", "shown at DEBUG");

    let console: Vec<(LogLevel, String)> = handle
        .console()
        .snapshot()
        .into_iter()
        .map(|e| (e.level, e.message))
        .collect();
    assert_eq!(
        console,
        vec![
            (
                LogLevel::Info,
                "Logger initialized with UI and rotating file handlers.".to_string()
            ),
            (LogLevel::Info, "Loaded 2 users.".to_string()),
            (LogLevel::Warning, "Failed login attempt.".to_string()),
            (LogLevel::Debug, "shown at DEBUG".to_string()),
        ]
    );

    // A second global subscriber is refused.
    assert!(matches!(logging::init(&config, false), Err(LoggingError::Init(_))));

    // Dropping the handle flushes the non-blocking writer.
    drop(handle);

    let content = std::fs::read_to_string(config.file_path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4, "{}", content);
    assert!(lines[0].ends_with(
        " [INFO] logging::setup - Logger initialized with UI and rotating file handlers."
    ));
    assert!(lines[1].ends_with(" [INFO] repository - Loaded 2 users."));
    assert!(lines[2].ends_with(" [WARNING] cli::app - Failed login attempt."));
    assert!(lines[3].ends_with(" [DEBUG] oci::identity - shown at DEBUG"));
    assert!(!content.contains("hidden at INFO"));
    assert!(!content.contains("third-party chatter"));
}
