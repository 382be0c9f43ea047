//! Wire models for the analyzer and anonymizer REST APIs

use crate::redaction::models::{DetectedEntity, OperatorMap};
use serde::{Deserialize, Serialize};

/// `POST /analyze` request body
#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub text: &'a str,
    pub language: &'a str,
    pub score_threshold: f64,
}

/// `POST /anonymize` request body
#[derive(Debug, Serialize)]
pub struct AnonymizeRequest<'a> {
    pub text: &'a str,
    pub analyzer_results: &'a [DetectedEntity],
    pub operators: &'a OperatorMap,
}

/// `POST /anonymize` response body
///
/// Only `text` is read; `items` and anything else the service adds are
/// ignored.
#[derive(Debug, Default, Deserialize)]
pub struct AnonymizeResponse {
    #[serde(default)]
    pub text: Option<String>,
}

/// Text returned by the anonymization client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnonymizedText {
    /// The service returned rewritten text
    Anonymized(String),
    /// The response had no `text`; this is the text that was sent
    Fallback(String),
}
