use hui_dao::config::LoggingConfig;
use hui_dao::logger;

#[test]
fn test_disabled_logging_installs_nothing() {
    let config = LoggingConfig::default();
    assert!(logger::init(&config).unwrap().is_none());
}

#[test]
fn test_file_logging_writes_records() {
    let dir = std::env::temp_dir().join(format!("hui-dao-log-test-{}", std::process::id()));
    let path = dir.join("test.log");
    let config = LoggingConfig {
        enabled: true,
        level: "debug".to_string(),
    };

    logger::init_with_path(&config, &path).unwrap();
    log::debug!("logger smoke test");
    log::trace!("filtered out");
    log::logger().flush();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("DEBUG"));
    assert!(content.contains("logger smoke test"));
    assert!(!content.contains("filtered out"));

    // Only one global logger per process
    assert!(logger::init_with_path(&config, &path).is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_log_file_path() {
    if let Ok(path) = logger::get_log_file_path() {
        assert!(path.ends_with("hui-dao/hui-dao.log"));
    }
}
