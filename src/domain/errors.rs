//! Domain error types
//!
//! This module defines the error hierarchy for NoteGuard.
//! All errors are domain-specific and don't expose third-party types.

use std::fmt;
use thiserror::Error;

/// Main NoteGuard error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum NoteGuardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Remote analyzer/anonymizer errors
    #[error("Presidio error: {0}")]
    Presidio(#[from] PresidioError),

    /// Rule library errors (bad pattern, bad placeholder, unreadable file)
    #[error("Rule library error: {0}")]
    RuleLibrary(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Which remote service a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteStage {
    /// Entity analysis (`POST /analyze`)
    Analyzer,
    /// Text anonymization (`POST /anonymize`)
    Anonymizer,
}

impl fmt::Display for RemoteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Analyzer => write!(f, "analyzer"),
            Self::Anonymizer => write!(f, "anonymizer"),
        }
    }
}

/// Presidio-specific errors
///
/// Errors that occur when talking to the analyzer or anonymizer services.
/// None of them are retried; they surface to the caller as a pipeline failure.
#[derive(Debug, Error)]
pub enum PresidioError {
    /// The request never produced a response (connect, timeout, TLS)
    #[error("{stage} request failed: {message}")]
    Transport { stage: RemoteStage, message: String },

    /// Non-success HTTP status
    #[error("{stage} failed: {status} - {body}")]
    Status {
        stage: RemoteStage,
        status: u16,
        body: String,
    },

    /// Response body did not have the expected JSON shape
    #[error("{stage} returned a malformed response: {message}")]
    MalformedResponse { stage: RemoteStage, message: String },
}

impl PresidioError {
    /// The service that produced this error
    pub fn stage(&self) -> RemoteStage {
        match self {
            Self::Transport { stage, .. }
            | Self::Status { stage, .. }
            | Self::MalformedResponse { stage, .. } => *stage,
        }
    }

    /// HTTP status, when the service answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for NoteGuardError {
    fn from(err: std::io::Error) -> Self {
        NoteGuardError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for NoteGuardError {
    fn from(err: serde_json::Error) -> Self {
        NoteGuardError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for NoteGuardError {
    fn from(err: toml::de::Error) -> Self {
        NoteGuardError::Configuration(format!("TOML parse error: {err}"))
    }
}
