//! Configuration schema types
//!
//! Every section has serde defaults, so an empty file describes a local
//! development setup against analyzer and anonymizer services on localhost.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration, mapped from `noteguard.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteGuardConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Entity analyzer service
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Anonymizer service
    #[serde(default)]
    pub anonymizer: AnonymizerConfig,

    /// Redaction pipeline settings
    #[serde(default)]
    pub redaction: RedactionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl NoteGuardConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.analyzer.validate()?;
        self.anonymizer.validate()?;
        self.redaction.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Entity analyzer service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Base URL; `/analyze` is appended
    #[serde(default = "default_analyzer_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// Optional bearer token
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

impl AnalyzerConfig {
    fn validate(&self) -> Result<(), String> {
        validate_base_url("analyzer", &self.base_url)?;
        validate_timeouts("analyzer", self.timeout_seconds, self.connect_timeout_seconds)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            base_url: default_analyzer_url(),
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            api_key: None,
        }
    }
}

/// Anonymizer service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizerConfig {
    /// Base URL; `/anonymize` is appended
    #[serde(default = "default_anonymizer_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// Optional bearer token
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
}

impl AnonymizerConfig {
    fn validate(&self) -> Result<(), String> {
        validate_base_url("anonymizer", &self.base_url)?;
        validate_timeouts(
            "anonymizer",
            self.timeout_seconds,
            self.connect_timeout_seconds,
        )
    }
}

impl Default for AnonymizerConfig {
    fn default() -> Self {
        Self {
            base_url: default_anonymizer_url(),
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            api_key: None,
        }
    }
}

/// Redaction pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Skip both remote calls and return the local result
    #[serde(default)]
    pub local_only: bool,

    /// Notes redacted at the same time by the visit redactor
    #[serde(default = "default_max_concurrent_notes")]
    pub max_concurrent_notes: usize,

    /// Replacement rule library (TOML); the built-in library is used when unset
    #[serde(default)]
    pub rule_library: Option<String>,
}

impl RedactionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_concurrent_notes == 0 || self.max_concurrent_notes > 64 {
            return Err(format!(
                "redaction.max_concurrent_notes must be between 1 and 64, got {}",
                self.max_concurrent_notes
            ));
        }

        if let Some(ref library) = self.rule_library {
            let path = Path::new(library);
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                return Err(format!(
                    "redaction.rule_library must be a .toml file, got '{library}'"
                ));
            }
            if !path.is_file() {
                return Err(format!("redaction.rule_library not found: {library}"));
            }
        }

        Ok(())
    }
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            local_only: false,
            max_concurrent_notes: default_max_concurrent_notes(),
            rule_library: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to rolling files
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn validate_base_url(section: &str, base_url: &str) -> Result<(), String> {
    if base_url.is_empty() {
        return Err(format!("{section}.base_url cannot be empty"));
    }

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(format!(
            "{section}.base_url must start with http:// or https://"
        ));
    }

    url::Url::parse(base_url)
        .map(|_| ())
        .map_err(|e| format!("{section}.base_url is not a valid URL: {e}"))
}

fn validate_timeouts(section: &str, timeout: u64, connect_timeout: u64) -> Result<(), String> {
    if !(1..=300).contains(&timeout) {
        return Err(format!(
            "{section}.timeout_seconds must be between 1 and 300, got {timeout}"
        ));
    }
    if !(1..=300).contains(&connect_timeout) {
        return Err(format!(
            "{section}.connect_timeout_seconds must be between 1 and 300, got {connect_timeout}"
        ));
    }
    Ok(())
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_analyzer_url() -> String {
    "http://localhost:5001".to_string()
}

pub(crate) fn default_anonymizer_url() -> String {
    "http://localhost:5002".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_max_concurrent_notes() -> usize {
    1
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_config_is_valid() {
        let config = NoteGuardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analyzer.base_url, "http://localhost:5001");
        assert_eq!(config.anonymizer.base_url, "http://localhost:5002");
        assert_eq!(config.analyzer.timeout_seconds, 30);
        assert_eq!(config.redaction.max_concurrent_notes, 1);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: NoteGuardConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert!(!config.redaction.local_only);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_analyzer_config_validation() {
        let mut config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());

        config.base_url = "ftp://analyzer".to_string();
        assert!(config.validate().is_err());

        config.base_url = "http://analyzer:3000".to_string();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());

        config.timeout_seconds = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_redaction_config_validation() {
        let mut config = RedactionConfig::default();
        assert!(config.validate().is_ok());

        config.max_concurrent_notes = 0;
        assert!(config.validate().is_err());

        config.max_concurrent_notes = 65;
        assert!(config.validate().is_err());

        config.max_concurrent_notes = 8;
        config.rule_library = Some("rules.json".to_string());
        assert!(config.validate().is_err());

        config.rule_library = Some("does/not/exist.toml".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_rotation_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_is_not_serialized() {
        let mut config = NoteGuardConfig::default();
        config.analyzer.api_key = Some(secret_string("very-secret".to_string()));
        assert_eq!(
            config.analyzer.api_key.as_ref().unwrap().expose_secret(),
            "very-secret"
        );

        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("very-secret"));
    }
}
