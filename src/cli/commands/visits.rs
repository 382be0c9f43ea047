//! Visits command implementation
//!
//! Reads a JSON array of visit notes, redacts every note and writes the
//! redacted listing as JSON.

use crate::config::load_config_or_default;
use crate::domain::VisitNote;
use crate::redaction::{RedactionOrchestrator, VisitRedactor};
use clap::Args;
use std::fs;

/// Arguments for the visits command
#[derive(Args, Debug)]
pub struct VisitsArgs {
    /// JSON file holding an array of visit notes
    #[arg(short, long)]
    pub input: String,

    /// Where to write the redacted visits (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<String>,
}

impl VisitsArgs {
    /// Execute the visits command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, "Redacting visit listing");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration");
                eprintln!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let visits = match VisitNote::read_listing(&self.input) {
            Ok(visits) => visits,
            Err(e) => {
                eprintln!("❌ Failed to read visits from {}", self.input);
                eprintln!("   Error: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        let orchestrator = match RedactionOrchestrator::from_config(&config) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("❌ Failed to initialize redaction pipeline");
                eprintln!("   Error: {e}");
                return Ok(2);
            }
        };

        let redactor = VisitRedactor::new(orchestrator, config.redaction.max_concurrent_notes);
        let (redacted, summary) = redactor.redact_visits_with_summary(visits).await;

        let body = serde_json::to_string_pretty(&redacted)?;
        match self.output {
            Some(ref path) => {
                if let Err(e) = fs::write(path, body) {
                    eprintln!("❌ Failed to write {path}");
                    eprintln!("   Error: {e}");
                    return Ok(5);
                }
                eprintln!("📝 Redacted visits written to {path}");
            }
            None => println!("{body}"),
        }

        eprintln!();
        eprintln!("📊 Visit Summary:");
        eprintln!("  Total: {}", summary.total);
        eprintln!("  Redacted: {}", summary.redacted);
        eprintln!("  Failed: {}", summary.failed);

        if summary.failed > 0 {
            eprintln!();
            eprintln!("⚠️  Some notes could not be redacted and were replaced");
            return Ok(3); // Pipeline failure exit code
        }

        Ok(0)
    }
}
