//! Redact command implementation
//!
//! Reads one note from `--input` or stdin, runs the pipeline and prints the
//! result on stdout. Status lines go to stderr.

use crate::config::load_config_or_default;
use crate::redaction::RedactionOrchestrator;
use clap::Args;
use serde_json::json;
use std::io::Read;

/// Arguments for the redact command
#[derive(Args, Debug)]
pub struct RedactArgs {
    /// File containing the note (reads stdin when omitted)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Apply local rules only, without calling the remote services
    #[arg(long)]
    pub local_only: bool,

    /// Print which local rules fired
    #[arg(long)]
    pub explain: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

impl RedactArgs {
    /// Execute the redact command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration");
                eprintln!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };
        if self.local_only {
            config.redaction.local_only = true;
        }

        let text = match self.read_note() {
            Ok(text) => text,
            Err(e) => {
                eprintln!("❌ Failed to read note");
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

        if self.explain {
            let (_, report) = orchestrator.local_redactor().redact_with_report(&text);
            eprintln!("📋 Local rules (library {})", report.rule_version);
            if report.hits.is_empty() {
                eprintln!("   no local rule matched");
            }
            for hit in &report.hits {
                eprintln!("   {:<14} {:<22} {}", hit.pass.to_string(), hit.rule, hit.hits);
            }
        }

        let outcome = match orchestrator.run(&text).await {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("❌ Redaction failed");
                eprintln!("   Error: {e}");
                return Ok(3); // Pipeline failure exit code
            }
        };

        let state = outcome.state();
        let result = outcome.into_outcome();

        if self.json {
            let body = json!({
                "state": state,
                "text": result.text,
                "wasLocallyRedacted": result.was_locally_redacted,
                "phiRedacted": result.phi_redacted,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        } else {
            println!("{}", result.text);
            eprintln!(
                "✅ {state} (locally redacted: {}, phi redacted: {})",
                result.was_locally_redacted, result.phi_redacted
            );
        }

        Ok(0)
    }

    fn read_note(&self) -> crate::domain::Result<String> {
        let text = match self.input {
            Some(ref path) => std::fs::read_to_string(path)?,
            None => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                text
            }
        };
        Ok(text)
    }
}
