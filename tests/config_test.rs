//! Config file loading and logging setup on disk

use std::fs;
use std::time::Duration;

use botdash::config::{self, ConfigError, DEFAULT_API_BASE};
use botdash::logging;

#[test]
fn test_load_full_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let log_dir = dir.path().join("logs");
    fs::write(
        &path,
        format!(
            "api_base = \"http://10.0.0.5:8000/\"\nstatus_refresh_secs = 30\nlog_dir = \"{}\"\n",
            log_dir.display()
        ),
    )
    .expect("write config");

    let config = config::load_from(&path).expect("valid config");
    assert_eq!(config.api_base, "http://10.0.0.5:8000/");
    assert_eq!(
        config::normalize_api_base(&config.api_base),
        "http://10.0.0.5:8000"
    );
    assert_eq!(config.status_refresh(), Some(Duration::from_secs(30)));
    assert_eq!(config.log_dir(), Some(log_dir));
}

#[test]
fn test_partial_config_uses_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "status_refresh_secs = 0\n").expect("write config");

    let config = config::load_from(&path).expect("valid config");
    assert_eq!(config.api_base, DEFAULT_API_BASE);
    assert_eq!(config.status_refresh(), None);
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config::load_from(&dir.path().join("absent.toml")).expect("defaults");
    assert_eq!(config.api_base, DEFAULT_API_BASE);
    assert_eq!(config.status_refresh_secs, 0);
}

#[test]
fn test_broken_file_reports_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "api_base = [not toml").expect("write config");

    let err = config::load_from(&path).unwrap_err();
    match &err {
        ConfigError::Parse { path: reported, .. } => assert_eq!(reported, &path),
        other => panic!("expected a parse error, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.starts_with("invalid config"), "{message}");
    assert!(message.contains("broken.toml"), "{message}");
}

#[test]
fn test_unreadable_path_reports_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    // a directory cannot be read as a file
    let err = config::load_from(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_env_var_overrides_config_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.toml");
    std::env::set_var("BOTDASH_CONFIG", &path);
    assert_eq!(config::config_path(), Some(path));
    std::env::remove_var("BOTDASH_CONFIG");
}

#[test]
fn test_logging_creates_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_dir = dir.path().join("nested").join("logs");
    logging::init(&log_dir).expect("logging init");
    assert!(log_dir.is_dir());

    // a second global subscriber is refused
    assert!(logging::init(&log_dir).is_err());
}
