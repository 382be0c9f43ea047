//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "noteguard.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing NoteGuard configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point analyzer.base_url and anonymizer.base_url at your services");
                println!("     (or set PRESIDIO_ANALYZER_URL / PRESIDIO_ANONYMIZER_URL)");
                println!("  2. Put API keys in a .env file if the services need them:");
                println!("     - NOTEGUARD_ANALYZER_API_KEY");
                println!("     - NOTEGUARD_ANONYMIZER_API_KEY");
                println!("  3. Validate configuration: noteguard validate-config --check-services");
                println!("  4. Redact a note: noteguard redact --input note.txt");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# NoteGuard Configuration File
# PHI redaction for clinical notes

[application]
log_level = "info"

[analyzer]
base_url = "http://localhost:5001"

[anonymizer]
base_url = "http://localhost:5002"

[redaction]
local_only = false
max_concurrent_notes = 1
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# NoteGuard Configuration File
# PHI redaction for clinical notes
#
# Values of the form ${VAR} are substituted from the environment.
# Every option can also be overridden with NOTEGUARD_<SECTION>_<KEY>.

[application]
# trace, debug, info, warn, error
log_level = "info"

[analyzer]
# Entity analysis service (POST /analyze); requests always use
# language "en" and score threshold 0.6
base_url = "http://localhost:5001"
timeout_seconds = 30
connect_timeout_seconds = 10
# Sent as a bearer token when set
# api_key = "${NOTEGUARD_ANALYZER_API_KEY}"

[anonymizer]
# Anonymization service (POST /anonymize)
base_url = "http://localhost:5002"
timeout_seconds = 30
connect_timeout_seconds = 10
# api_key = "${NOTEGUARD_ANONYMIZER_API_KEY}"

[redaction]
# Skip the remote services and apply local rules only
local_only = false
# Notes of one visit listing processed at the same time (1 - 64)
max_concurrent_notes = 1
# Replace the built-in rule library with a TOML file
# rule_library = "rules/phi_rules.toml"

[logging]
# JSON log files in addition to the console output
local_enabled = false
local_path = "./logs"
# daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}
