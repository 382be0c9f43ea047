//! Redaction of visit listings
//!
//! Every note goes through the pipeline once. A failed note is replaced by
//! [`REDACTION_FAILED_NOTE`]; its raw text never reaches the output.
//!
//! [`REDACTION_FAILED_NOTE`]: crate::domain::REDACTION_FAILED_NOTE

use crate::domain::{NoteGuardError, RedactedVisit, Result, VisitNote};
use crate::redaction::orchestrator::RedactionOrchestrator;
use futures::stream::{self, StreamExt};
use serde::Serialize;

/// Counts for one batch of visits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisitRedactionSummary {
    pub total: usize,
    pub redacted: usize,
    pub failed: usize,
}

/// Runs the pipeline over a patient's visits
pub struct VisitRedactor {
    orchestrator: RedactionOrchestrator,
    max_concurrent: usize,
}

impl VisitRedactor {
    /// `max_concurrent` of 0 is treated as 1 (sequential)
    pub fn new(orchestrator: RedactionOrchestrator, max_concurrent: usize) -> Self {
        Self {
            orchestrator,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Redact every visit, ordered by visit date (oldest first)
    ///
    /// Notes may be processed concurrently, but each note's own pipeline is
    /// sequential and output order does not depend on completion order.
    pub async fn redact_visits(&self, visits: Vec<VisitNote>) -> Vec<RedactedVisit> {
        self.redact_in_date_order(visits)
            .await
            .into_iter()
            .map(|(visit, _)| visit)
            .collect()
    }

    /// Redact every visit and count the failures
    pub async fn redact_visits_with_summary(
        &self,
        visits: Vec<VisitNote>,
    ) -> (Vec<RedactedVisit>, VisitRedactionSummary) {
        let results = self.redact_in_date_order(visits).await;
        let failed = results.iter().filter(|(_, ok)| !ok).count();
        let summary = VisitRedactionSummary {
            total: results.len(),
            redacted: results.len() - failed,
            failed,
        };
        (results.into_iter().map(|(visit, _)| visit).collect(), summary)
    }

    /// Redact a single visit
    ///
    /// A visit without a stored note runs the pipeline on empty text.
    pub async fn redact_visit(&self, visit: &VisitNote) -> RedactedVisit {
        match self.try_redact_visit(visit).await {
            Ok(redacted) => redacted,
            Err(e) => Self::placeholder(visit, &e),
        }
    }

    /// Each result is paired with whether its pipeline succeeded
    async fn redact_in_date_order(
        &self,
        mut visits: Vec<VisitNote>,
    ) -> Vec<(RedactedVisit, bool)> {
        visits.sort_by_key(|visit| visit.visit_date);

        tracing::info!(
            visits = visits.len(),
            max_concurrent = self.max_concurrent,
            "Redacting visit notes"
        );

        stream::iter(visits.iter())
            .map(|visit| async move {
                match self.try_redact_visit(visit).await {
                    Ok(redacted) => (redacted, true),
                    Err(e) => (Self::placeholder(visit, &e), false),
                }
            })
            .buffered(self.max_concurrent)
            .collect()
            .await
    }

    async fn try_redact_visit(&self, visit: &VisitNote) -> Result<RedactedVisit> {
        let outcome = self
            .orchestrator
            .run_opt(visit.doctors_note.as_deref())
            .await?;
        let phi_redacted = outcome.remote_completed();
        let text = outcome.into_outcome().text;
        Ok(RedactedVisit::redacted(visit, text, phi_redacted))
    }

    fn placeholder(visit: &VisitNote, error: &NoteGuardError) -> RedactedVisit {
        tracing::warn!(
            patient_id = visit.patient_id,
            visit_id = visit.visit_id,
            error = %error,
            "Note redaction failed, returning placeholder note"
        );
        RedactedVisit::failed(visit)
    }
}
