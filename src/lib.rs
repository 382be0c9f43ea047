// NoteGuard - PHI redaction for clinical notes
// Copyright (c) 2025 NoteGuard Contributors
// Licensed under the MIT License

//! # NoteGuard - PHI redaction for clinical notes
//!
//! NoteGuard removes protected health information from free-text doctor's
//! notes before they leave the clinical system.
//!
//! ## Overview
//!
//! Every note goes through three stages:
//! - **Local rules**: a versioned table of regular expressions (identifiers,
//!   clinical content, contextual hints) plus a name heuristic
//! - **Entity analysis**: a Presidio-compatible analyzer finds what the rules
//!   missed
//! - **Anonymization**: a Presidio-compatible anonymizer replaces each detected
//!   entity with a `[TYPE_REDACTED]` placeholder
//!
//! If analysis finds nothing the anonymizer is never called. Any remote failure
//! fails the whole note; callers that list visits substitute a fixed sentinel
//! so raw text is never returned.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`redaction`] - Rule table, local redactor, orchestrator, visit redactor
//! - [`adapters`] - HTTP clients for the analyzer and anonymizer services
//! - [`domain`] - Visit records and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use noteguard::config::load_config_or_default;
//! use noteguard::redaction::RedactionOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("noteguard.toml")?;
//!     let orchestrator = RedactionOrchestrator::from_config(&config)?;
//!
//!     let outcome = orchestrator
//!         .redact_note("Patient named Jonathan Miller, SSN 123-45-6789.")
//!         .await?;
//!
//!     println!("{}", outcome.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Local Redaction Only
//!
//! The rule passes need no network and can be used on their own:
//!
//! ```rust
//! use noteguard::redaction::LocalRedactor;
//!
//! # fn example() -> noteguard::domain::Result<()> {
//! let redactor = LocalRedactor::builtin()?;
//! let result = redactor.redact("Call 555-123-4567 about the results");
//! assert!(result.changed);
//! assert!(!result.text.contains("555-123-4567"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`], whose error type is
//! [`domain::NoteGuardError`]. Remote failures carry a
//! [`domain::PresidioError`] that names the stage that failed.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod redaction;
