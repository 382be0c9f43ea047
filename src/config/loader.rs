//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::NoteGuardConfig;
use super::secret::secret_string;
use crate::domain::errors::NoteGuardError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into NoteGuardConfig
/// 4. Applies environment variable overrides (NOTEGUARD_* and PRESIDIO_*)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`NoteGuardError::Configuration`] if the file cannot be read or
/// parsed, a referenced variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use noteguard::config::loader::load_config;
///
/// let config = load_config("noteguard.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<NoteGuardConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(NoteGuardError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        NoteGuardError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML content
pub fn load_config_str(contents: &str) -> Result<NoteGuardConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: NoteGuardConfig = toml::from_str(&contents)
        .map_err(|e| NoteGuardError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        NoteGuardError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Load the configuration file if it exists, otherwise start from defaults
///
/// Overrides from the environment apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<NoteGuardConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(
        path = %path.display(),
        "Configuration file not found, using defaults"
    );
    load_config_str("")
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(NoteGuardError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides
///
/// Variables follow the pattern NOTEGUARD_<SECTION>_<KEY>, for example
/// NOTEGUARD_ANALYZER_TIMEOUT_SECONDS. PRESIDIO_ANALYZER_URL and
/// PRESIDIO_ANONYMIZER_URL set the service base URLs and win over the
/// NOTEGUARD_* equivalents.
fn apply_env_overrides(config: &mut NoteGuardConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("NOTEGUARD_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Analyzer overrides
    if let Ok(val) = std::env::var("NOTEGUARD_ANALYZER_BASE_URL") {
        config.analyzer.base_url = val;
    }
    if let Ok(val) = std::env::var("NOTEGUARD_ANALYZER_TIMEOUT_SECONDS") {
        config.analyzer.timeout_seconds = parse_override("NOTEGUARD_ANALYZER_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("NOTEGUARD_ANALYZER_API_KEY") {
        config.analyzer.api_key = Some(secret_string(val));
    }

    // Anonymizer overrides
    if let Ok(val) = std::env::var("NOTEGUARD_ANONYMIZER_BASE_URL") {
        config.anonymizer.base_url = val;
    }
    if let Ok(val) = std::env::var("NOTEGUARD_ANONYMIZER_TIMEOUT_SECONDS") {
        config.anonymizer.timeout_seconds =
            parse_override("NOTEGUARD_ANONYMIZER_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("NOTEGUARD_ANONYMIZER_API_KEY") {
        config.anonymizer.api_key = Some(secret_string(val));
    }

    // Deployment-level service URLs
    if let Ok(val) = std::env::var("PRESIDIO_ANALYZER_URL") {
        config.analyzer.base_url = val;
    }
    if let Ok(val) = std::env::var("PRESIDIO_ANONYMIZER_URL") {
        config.anonymizer.base_url = val;
    }

    // Redaction overrides
    if let Ok(val) = std::env::var("NOTEGUARD_REDACTION_LOCAL_ONLY") {
        config.redaction.local_only = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("NOTEGUARD_REDACTION_MAX_CONCURRENT_NOTES") {
        if let Ok(concurrency) = val.parse() {
            config.redaction.max_concurrent_notes = concurrency;
        }
    }
    if let Ok(val) = std::env::var("NOTEGUARD_REDACTION_RULE_LIBRARY") {
        config.redaction.rule_library = Some(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("NOTEGUARD_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("NOTEGUARD_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("NOTEGUARD_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        NoteGuardError::Configuration(format!("Invalid value for {name}: '{value}'"))
    })
}
