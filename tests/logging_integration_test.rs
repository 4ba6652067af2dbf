//! Integration tests for logging functionality
//!
//! The global subscriber can be installed once per process, so everything
//! that initializes logging lives in a single test.

use aegis::config::LoggingConfig;
use aegis::domain::AegisError;
use aegis::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_invalid_level_is_rejected_before_install() {
    let err = init_logging("verbose", &LoggingConfig::default()).unwrap_err();
    assert!(matches!(err, AegisError::Configuration(_)));
}

#[test]
fn test_file_logging_writes_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };
    assert!(!log_path.exists());
    std::env::remove_var("RUST_LOG");

    let guard = init_logging("debug", &config).expect("first initialization succeeds");
    assert!(log_path.is_dir());

    // The filter admits `aegis` targets only
    tracing::warn!(target: "aegis::gateway", attempt = 1, "Report fetch retried");
    tracing::info!(target: "aegis::audit", redacted = true, "Outbound message screened");
    tracing::info!(target: "other_crate", "Filtered out");

    // Flush the non-blocking writer
    drop(guard);

    let contents = std::fs::read_to_string(log_path.join("aegis.log")).unwrap();
    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert!(lines
        .iter()
        .any(|l| l["fields"]["message"] == "Report fetch retried" && l["level"] == "WARN"));
    assert!(!lines.iter().any(|l| l["target"] == "other_crate"));
    assert!(lines
        .iter()
        .any(|l| l["target"] == "aegis::audit" && l["fields"]["redacted"] == true));

    // A second subscriber cannot be installed
    assert!(init_logging("info", &LoggingConfig::default()).is_err());
}
