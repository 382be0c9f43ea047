//! Configuration management for NoteGuard.
//!
//! NoteGuard reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `NOTEGUARD_<SECTION>_<KEY>` and `PRESIDIO_*_URL` overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use noteguard::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("noteguard.toml")?;
//!
//! println!("Analyzer: {}", config.analyzer.base_url);
//! println!("Anonymizer: {}", config.anonymizer.base_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`AnalyzerConfig`] - Entity analyzer URL and timeouts
//! - [`AnonymizerConfig`] - Anonymizer URL and timeouts
//! - [`RedactionConfig`] - Local-only mode, concurrency, rule library
//! - [`LoggingConfig`] - Rolling file logs
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [analyzer]
//! base_url = "http://localhost:5001"
//! api_key = "${NOTEGUARD_ANALYZER_API_KEY}"
//!
//! [anonymizer]
//! base_url = "http://localhost:5002"
//!
//! [redaction]
//! max_concurrent_notes = 4
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_or_default, load_config_str};
pub use schema::{
    AnalyzerConfig, AnonymizerConfig, ApplicationConfig, LoggingConfig, NoteGuardConfig,
    RedactionConfig,
};
pub use secret::{bearer_value, secret_string, SecretString, SecretValue};
