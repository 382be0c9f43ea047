//! Presidio analyzer and anonymizer integration
//!
//! Two JSON-over-HTTP services:
//!
//! - analyzer: `POST /analyze` with `{text, language, score_threshold}`,
//!   answers with a list of entity spans
//! - anonymizer: `POST /anonymize` with `{text, analyzer_results, operators}`,
//!   answers with `{text}`
//!
//! Calls are never retried. Every failure carries the [`RemoteStage`] it
//! came from.
//!
//! [`RemoteStage`]: crate::domain::RemoteStage

pub mod analyzer;
pub mod anonymizer;
mod http;
pub mod models;
pub mod traits;

pub use analyzer::{EntityAnalysisClient, ANALYZER_LANGUAGE, ANALYZER_SCORE_THRESHOLD};
pub use anonymizer::AnonymizationClient;
pub use models::AnonymizedText;
pub use traits::{EntityAnalyzer, TextAnonymizer};
