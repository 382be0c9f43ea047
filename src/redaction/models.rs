//! Redaction pipeline data models

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Entity span reported by the remote analyzer
///
/// Offsets refer to the locally redacted text that was sent for analysis,
/// not to the original note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedEntity {
    /// Entity type label (e.g. `PERSON`, `LOCATION`)
    pub entity_type: String,
    /// Start offset
    pub start: i64,
    /// End offset
    pub end: i64,
    /// Confidence score (0.0 - 1.0)
    pub score: f64,
    /// Recognizer explanation; the analyzer sends `null` unless asked for it
    #[serde(
        rename = "analysis_explanation",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub explanation: String,
}

impl DetectedEntity {
    pub fn new(entity_type: impl Into<String>, start: i64, end: i64, score: f64) -> Self {
        Self {
            entity_type: entity_type.into(),
            start,
            end,
            score,
            explanation: String::new(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Kind of anonymization operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    /// Replace the span with a literal value
    Replace,
}

/// Anonymization instruction for one entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizationOperator {
    #[serde(rename = "type")]
    pub kind: OperatorKind,
    pub new_value: String,
}

impl AnonymizationOperator {
    pub fn replace(new_value: impl Into<String>) -> Self {
        Self {
            kind: OperatorKind::Replace,
            new_value: new_value.into(),
        }
    }
}

/// Operator per entity type, ordered by entity type
pub type OperatorMap = BTreeMap<String, AnonymizationOperator>;

/// Why the remote stages did not produce the final text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The anonymizer answered successfully but without a `text` field
    AnonymizerReturnedNoText,
    /// Remote calls are switched off (`redaction.local_only`)
    RemoteDisabled,
}

/// Terminal state of a successful pipeline run
///
/// Failures are the `Err` arm of the orchestrator's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Analyzer found entities and the anonymizer returned new text
    Anonymized {
        text: String,
        locally_redacted: bool,
    },
    /// Analyzer found nothing beyond the local rules; anonymizer not called
    ShortCircuit {
        text: String,
        locally_redacted: bool,
    },
    /// Only the local pass is reflected in `text`
    LocalOnlyFallback {
        text: String,
        locally_redacted: bool,
        reason: FallbackReason,
    },
}

impl PipelineOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Anonymized { text, .. }
            | Self::ShortCircuit { text, .. }
            | Self::LocalOnlyFallback { text, .. } => text,
        }
    }

    pub fn was_locally_redacted(&self) -> bool {
        match self {
            Self::Anonymized {
                locally_redacted, ..
            }
            | Self::ShortCircuit {
                locally_redacted, ..
            }
            | Self::LocalOnlyFallback {
                locally_redacted, ..
            } => *locally_redacted,
        }
    }

    /// Whether the remote services were consulted and both stages that ran
    /// succeeded
    pub fn remote_completed(&self) -> bool {
        !matches!(
            self,
            Self::LocalOnlyFallback {
                reason: FallbackReason::RemoteDisabled,
                ..
            }
        )
    }

    /// Short state name for logs and CLI output
    pub fn state(&self) -> &'static str {
        match self {
            Self::Anonymized { .. } => "anonymized",
            Self::ShortCircuit { .. } => "short_circuit",
            Self::LocalOnlyFallback { .. } => "local_only_fallback",
        }
    }

    /// Collapse into the caller-facing outcome
    ///
    /// `phi_redacted` is true after anonymization, mirrors the local flag on
    /// a short circuit and is false for every fallback.
    pub fn into_outcome(self) -> RedactionOutcome {
        let was_locally_redacted = self.was_locally_redacted();
        let (text, phi_redacted) = match self {
            Self::Anonymized { text, .. } => (text, true),
            Self::ShortCircuit {
                text,
                locally_redacted,
            } => (text, locally_redacted),
            Self::LocalOnlyFallback { text, .. } => (text, false),
        };

        RedactionOutcome {
            text,
            was_locally_redacted,
            phi_redacted,
        }
    }
}

/// Final, externally visible result of redacting one note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionOutcome {
    pub text: String,
    pub was_locally_redacted: bool,
    /// Never set when the anonymizer was skipped by a fallback
    pub phi_redacted: bool,
}
