//! Visit note records
//!
//! A visit note is the unit the upstream visit listing hands to the redaction
//! pipeline. Storage of these records lives outside this crate; they arrive
//! here already loaded (for the CLI, from a JSON file).

use super::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Text substituted for a note whose redaction pipeline failed
pub const REDACTION_FAILED_NOTE: &str = "Could not redact doctors note";

/// A stored visit with its raw (unredacted) doctor's note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitNote {
    /// Patient the visit belongs to
    pub patient_id: i64,

    /// Visit identifier
    pub visit_id: i64,

    /// Raw free-text note; may contain PHI. `None` when no note was stored
    #[serde(default)]
    pub doctors_note: Option<String>,

    /// When the visit happened
    pub visit_date: DateTime<Utc>,

    /// Last modification of the record
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl VisitNote {
    /// Create a visit note stamped with the current time as `updated_at`
    pub fn new(
        patient_id: i64,
        visit_id: i64,
        doctors_note: impl Into<String>,
        visit_date: DateTime<Utc>,
    ) -> Self {
        Self {
            patient_id,
            visit_id,
            doctors_note: Some(doctors_note.into()),
            visit_date,
            updated_at: Utc::now(),
        }
    }

    /// Read a JSON array of visit notes
    ///
    /// # Errors
    ///
    /// [`NoteGuardError::Io`] when the file cannot be read and
    /// [`NoteGuardError::Serialization`] when it is not a visit array.
    ///
    /// [`NoteGuardError::Io`]: super::NoteGuardError::Io
    /// [`NoteGuardError::Serialization`]: super::NoteGuardError::Serialization
    pub fn read_listing(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// A visit as returned to callers, with the note redacted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactedVisit {
    #[serde(rename = "patientID")]
    pub patient_id: i64,

    #[serde(rename = "visitID")]
    pub visit_id: i64,

    /// Redacted note, or [`REDACTION_FAILED_NOTE`] when the pipeline failed
    pub doctors_note: String,

    pub visit_date: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// True when the pipeline succeeded with the remote services consulted
    pub phi_redacted: bool,
}

impl RedactedVisit {
    /// Build the result for a visit whose note went through the pipeline
    pub fn redacted(visit: &VisitNote, text: String, phi_redacted: bool) -> Self {
        Self {
            patient_id: visit.patient_id,
            visit_id: visit.visit_id,
            doctors_note: text,
            visit_date: visit.visit_date,
            updated_at: visit.updated_at,
            phi_redacted,
        }
    }

    /// Build the result for a visit whose pipeline failed
    ///
    /// The raw note is dropped; only the sentinel text is returned.
    pub fn failed(visit: &VisitNote) -> Self {
        Self {
            patient_id: visit.patient_id,
            visit_id: visit.visit_id,
            doctors_note: REDACTION_FAILED_NOTE.to_string(),
            visit_date: visit.visit_date,
            updated_at: visit.updated_at,
            phi_redacted: false,
        }
    }
}
