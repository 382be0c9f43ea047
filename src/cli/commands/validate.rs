//! Validate config command implementation
//!
//! Loads the configuration file and the rule library it points at, and can
//! optionally probe the two remote services.

use crate::adapters::presidio::{ANALYZER_LANGUAGE, ANALYZER_SCORE_THRESHOLD};
use crate::config::load_config;
use crate::redaction::{RedactionOrchestrator, RuleCategory};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also check that the analyzer and anonymizer answer their health endpoints
    #[arg(long)]
    pub check_services: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config also runs validation
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let orchestrator = match RedactionOrchestrator::from_config(&config) {
            Ok(o) => {
                println!("✅ Rule library loaded");
                o
            }
            Err(e) => {
                println!("❌ Failed to load rule library");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let table = orchestrator.local_redactor().table();
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Analyzer: {}", config.analyzer.base_url);
        println!(
            "  Analyzer Language: {} (score threshold {})",
            ANALYZER_LANGUAGE, ANALYZER_SCORE_THRESHOLD
        );
        println!("  Anonymizer: {}", config.anonymizer.base_url);
        println!("  Local Only: {}", config.redaction.local_only);
        println!(
            "  Max Concurrent Notes: {}",
            config.redaction.max_concurrent_notes
        );
        println!(
            "  Rule Library: {} (version {})",
            config
                .redaction
                .rule_library
                .as_deref()
                .unwrap_or("built-in"),
            table.version()
        );
        for category in RuleCategory::PASS_ORDER {
            println!("    {}: {} rules", category, table.rules(category).len());
        }
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }

        if self.check_services {
            println!();
            println!("🔌 Checking remote services...");
            match orchestrator.health_check().await {
                Ok(()) => println!("✅ Analyzer and anonymizer are reachable"),
                Err(e) => {
                    println!("❌ Service check failed");
                    println!("   Error: {e}");
                    return Ok(3); // Pipeline failure exit code
                }
            }
        }

        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let args = ValidateArgs {
            check_services: false,
        };
        assert_eq!(args.execute("no/such/noteguard.toml").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[analyzer]\nbase_url = \"http://localhost:5001\"\n\n[redaction]\nmax_concurrent_notes = 4"
        )
        .unwrap();

        let args = ValidateArgs {
            check_services: false,
        };
        let code = args
            .execute(&file.path().to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_invalid_timeout_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[analyzer]\ntimeout_seconds = 0").unwrap();

        let args = ValidateArgs {
            check_services: false,
        };
        let code = args
            .execute(&file.path().to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
