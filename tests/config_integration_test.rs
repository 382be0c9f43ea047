//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables hold ENV_MUTEX so they do
//! not interfere with each other.

use noteguard::config::{load_config, load_config_or_default, load_config_str};
use noteguard::redaction::RedactionOrchestrator;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for var in [
        "NOTEGUARD_APPLICATION_LOG_LEVEL",
        "NOTEGUARD_ANALYZER_BASE_URL",
        "NOTEGUARD_ANALYZER_TIMEOUT_SECONDS",
        "NOTEGUARD_ANALYZER_API_KEY",
        "NOTEGUARD_ANONYMIZER_BASE_URL",
        "NOTEGUARD_REDACTION_LOCAL_ONLY",
        "NOTEGUARD_REDACTION_MAX_CONCURRENT_NOTES",
        "PRESIDIO_ANALYZER_URL",
        "PRESIDIO_ANONYMIZER_URL",
        "TEST_ANALYZER_KEY",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[analyzer]
base_url = "https://presidio.internal:5001"
timeout_seconds = 20
connect_timeout_seconds = 5

[anonymizer]
base_url = "https://presidio.internal:5002"
timeout_seconds = 15

[redaction]
local_only = false
max_concurrent_notes = 8

[logging]
local_enabled = true
local_path = "/var/log/noteguard"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.analyzer.base_url, "https://presidio.internal:5001");
    assert_eq!(config.analyzer.timeout_seconds, 20);
    assert_eq!(config.analyzer.connect_timeout_seconds, 5);
    assert_eq!(config.anonymizer.timeout_seconds, 15);
    assert_eq!(config.anonymizer.connect_timeout_seconds, 10);
    assert_eq!(config.redaction.max_concurrent_notes, 8);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_empty_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let config = load_config_str("").unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.analyzer.base_url, "http://localhost:5001");
    assert_eq!(config.analyzer.timeout_seconds, 30);
    assert_eq!(config.anonymizer.base_url, "http://localhost:5002");
    assert!(!config.redaction.local_only);
    assert_eq!(config.redaction.max_concurrent_notes, 1);
    assert!(config.redaction.rule_library.is_none());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let config = load_config_or_default("no/such/noteguard.toml").unwrap();
    assert_eq!(config.analyzer.base_url, "http://localhost:5001");

    assert!(load_config("no/such/noteguard.toml").is_err());
}

#[test]
fn test_env_var_substitution_for_api_key() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_ANALYZER_KEY", "s3cr3t-token");

    let file = write_config(
        r#"
[analyzer]
api_key = "${TEST_ANALYZER_KEY}"
"#,
    );
    let config = load_config(file.path()).unwrap();

    let key = config.analyzer.api_key.as_ref().unwrap();
    let exposed: &str = key.expose_secret().as_ref();
    assert_eq!(exposed, "s3cr3t-token");
    // Debug output never shows the key
    assert!(!format!("{:?}", config.analyzer).contains("s3cr3t-token"));

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable_is_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[analyzer]
api_key = "${TEST_ANALYZER_KEY}"
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_ANALYZER_KEY"));
}

#[test]
fn test_noteguard_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("NOTEGUARD_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("NOTEGUARD_ANALYZER_TIMEOUT_SECONDS", "40");
    std::env::set_var("NOTEGUARD_REDACTION_LOCAL_ONLY", "true");
    std::env::set_var("NOTEGUARD_REDACTION_MAX_CONCURRENT_NOTES", "6");

    let config = load_config_str("[application]\nlog_level = \"debug\"\n").unwrap();

    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.analyzer.timeout_seconds, 40);
    assert!(config.redaction.local_only);
    assert_eq!(config.redaction.max_concurrent_notes, 6);

    cleanup_env_vars();
}

#[test]
fn test_presidio_urls_win_over_noteguard_urls() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("NOTEGUARD_ANALYZER_BASE_URL", "http://noteguard-analyzer:5001");
    std::env::set_var("PRESIDIO_ANALYZER_URL", "http://presidio-analyzer:3000");
    std::env::set_var("PRESIDIO_ANONYMIZER_URL", "http://presidio-anonymizer:3000");

    let config = load_config_str("").unwrap();

    assert_eq!(config.analyzer.base_url, "http://presidio-analyzer:3000");
    assert_eq!(config.anonymizer.base_url, "http://presidio-anonymizer:3000");

    cleanup_env_vars();
}

#[test]
fn test_invalid_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("NOTEGUARD_ANALYZER_TIMEOUT_SECONDS", "soon");

    let err = load_config_str("").unwrap_err();
    assert!(err.to_string().contains("NOTEGUARD_ANALYZER_TIMEOUT_SECONDS"));

    cleanup_env_vars();
}

#[test]
fn test_validation_errors() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let cases = [
        "[analyzer]\nbase_url = \"not a url\"\n",
        "[analyzer]\nconnect_timeout_seconds = 301\n",
        "[anonymizer]\nbase_url = \"ftp://presidio:5002\"\n",
        "[anonymizer]\ntimeout_seconds = 0\n",
        "[redaction]\nmax_concurrent_notes = 0\n",
        "[redaction]\nrule_library = \"no/such/rules.toml\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
        "[application]\nlog_level = \"verbose\"\n",
    ];

    for case in cases {
        assert!(load_config_str(case).is_err(), "accepted invalid config: {case}");
    }
}

#[test]
fn test_orchestrator_from_custom_rule_library() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let mut rules = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    rules
        .write_all(
            br#"
version = "site-7"

[[structured]]
name = "badge"
pattern = '\bBADGE-\d{4}\b'
placeholder = "[BADGE REDACTED]"
"#,
        )
        .unwrap();
    rules.flush().unwrap();

    let content = format!(
        "[redaction]\nlocal_only = true\nrule_library = \"{}\"\n",
        rules.path().display().to_string().replace('\\', "/")
    );
    let config = load_config_str(&content).unwrap();
    let orchestrator = RedactionOrchestrator::from_config(&config).unwrap();

    assert!(orchestrator.is_local_only());
    assert_eq!(orchestrator.local_redactor().table().version(), "site-7");
}
