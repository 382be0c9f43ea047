//! External system integrations for NoteGuard.
//!
//! - [`presidio`] - entity analyzer and anonymizer HTTP clients
//!
//! The redaction pipeline depends on the [`presidio::EntityAnalyzer`] and
//! [`presidio::TextAnonymizer`] traits, not on the HTTP clients, so tests can
//! substitute in-memory fakes.
//!
//! ```rust,no_run
//! use noteguard::adapters::presidio::{AnonymizationClient, EntityAnalysisClient};
//! use noteguard::config::NoteGuardConfig;
//!
//! # fn example() -> noteguard::domain::Result<()> {
//! let config = NoteGuardConfig::default();
//! let analyzer = EntityAnalysisClient::new(&config.analyzer)?;
//! let anonymizer = AnonymizationClient::new(&config.anonymizer)?;
//! # Ok(())
//! # }
//! ```

pub mod presidio;
