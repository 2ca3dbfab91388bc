use shared::LoggingConfig;
use tempfile::TempDir;

#[test]
fn test_init_rotates_by_size() {
    let dir = TempDir::new().unwrap();
    let config = LoggingConfig {
        dir: dir.path().to_path_buf(),
        max_bytes: 256,
        backup_count: 2,
        ..LoggingConfig::default()
    };

    let handle = logging::init(&config, false).unwrap();
    for i in 0..40 {
        tracing::info!(target: "repository", "Loaded {} policies.", i);
    }
    drop(handle);

    let active = config.file_path();
    let first = dir.path().join("app.log.1");
    let second = dir.path().join("app.log.2");
    assert!(active.exists());
    assert!(first.exists());
    assert!(second.exists());
    assert!(!dir.path().join("app.log.3").exists());

    for path in [&active, &first, &second] {
        let size = std::fs::metadata(path).unwrap().len();
        assert!(size <= 256, "{} is {} bytes", path.display(), size);
    }

    let newest = std::fs::read_to_string(&active).unwrap();
    assert!(newest.contains("Loaded 39 policies."));
}
