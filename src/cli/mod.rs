//! CLI interface and argument parsing
//!
//! Exit codes shared by all commands: 0 success, 2 configuration error,
//! 3 pipeline failure, 5 fatal error.

pub mod commands;

use clap::{Parser, Subcommand};

/// NoteGuard - PHI redaction for clinical notes
#[derive(Parser, Debug)]
#[command(name = "noteguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "noteguard.toml", env = "NOTEGUARD_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "NOTEGUARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redact one note read from a file or stdin
    Redact(commands::redact::RedactArgs),

    /// Redact the notes of a JSON visit listing
    Visits(commands::visits::VisitsArgs),

    /// List the active redaction rules
    Rules(commands::rules::RulesArgs),

    /// Validate configuration file and rule library
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_redact() {
        let cli = Cli::parse_from(["noteguard", "redact"]);
        assert_eq!(cli.config, "noteguard.toml");
        assert!(matches!(cli.command, Commands::Redact(_)));
    }

    #[test]
    fn test_cli_parse_redact_flags() {
        let cli = Cli::parse_from([
            "noteguard",
            "redact",
            "--input",
            "note.txt",
            "--local-only",
            "--explain",
            "--json",
        ]);
        match cli.command {
            Commands::Redact(args) => {
                assert_eq!(args.input.as_deref(), Some("note.txt"));
                assert!(args.local_only);
                assert!(args.explain);
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["noteguard", "--config", "custom.toml", "rules"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["noteguard", "--log-level", "debug", "rules"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_visits_requires_input() {
        assert!(Cli::try_parse_from(["noteguard", "visits"]).is_err());
        let cli = Cli::parse_from(["noteguard", "visits", "--input", "visits.json"]);
        assert!(matches!(cli.command, Commands::Visits(_)));
    }

    #[test]
    fn test_cli_parse_rules_category() {
        let cli = Cli::parse_from(["noteguard", "rules", "--category", "clinical"]);
        match cli.command {
            Commands::Rules(args) => assert_eq!(args.category.as_deref(), Some("clinical")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["noteguard", "validate-config", "--check-services"]);
        match cli.command {
            Commands::ValidateConfig(args) => assert!(args.check_services),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["noteguard", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
