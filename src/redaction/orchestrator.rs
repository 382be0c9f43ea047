//! Redaction pipeline orchestration
//!
//! [`RedactionOrchestrator`] runs one note through
//!
//! ```text
//! local rules -> analyze -> (no entities: short circuit)
//!                        -> build operators -> anonymize
//! ```
//!
//! The analyzer and anonymizer always see the locally redacted text, never
//! the original. Remote failures are returned to the caller; there is no
//! silent downgrade to the local result and no retry.
//!
//! # Examples
//!
//! ```no_run
//! use noteguard::config::NoteGuardConfig;
//! use noteguard::redaction::RedactionOrchestrator;
//!
//! # async fn example() -> noteguard::domain::Result<()> {
//! let orchestrator = RedactionOrchestrator::from_config(&NoteGuardConfig::default())?;
//! let outcome = orchestrator
//!     .redact_note("Patient named Jonathan Miller, SSN 123-45-6789")
//!     .await?;
//! println!("{} (confirmed: {})", outcome.text, outcome.phi_redacted);
//! # Ok(())
//! # }
//! ```

use crate::adapters::presidio::{
    AnonymizationClient, AnonymizedText, EntityAnalysisClient, EntityAnalyzer, TextAnonymizer,
};
use crate::config::NoteGuardConfig;
use crate::domain::Result;
use crate::redaction::local::LocalRedactor;
use crate::redaction::models::{FallbackReason, PipelineOutcome, RedactionOutcome};
use crate::redaction::operators::build_operators;
use crate::redaction::rules::RuleTable;
use crate::{log_pipeline_complete, log_pipeline_failure, log_stage};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Sequences the local redactor and the two remote services
///
/// Cheap to share: the rule table and clients sit behind `Arc`s and no call
/// mutates the orchestrator.
#[derive(Clone)]
pub struct RedactionOrchestrator {
    redactor: LocalRedactor,
    analyzer: Arc<dyn EntityAnalyzer>,
    anonymizer: Arc<dyn TextAnonymizer>,
    local_only: bool,
}

impl RedactionOrchestrator {
    pub fn new(
        redactor: LocalRedactor,
        analyzer: Arc<dyn EntityAnalyzer>,
        anonymizer: Arc<dyn TextAnonymizer>,
    ) -> Self {
        Self {
            redactor,
            analyzer,
            anonymizer,
            local_only: false,
        }
    }

    /// Skip both remote calls and return the local result
    pub fn with_local_only(mut self, local_only: bool) -> Self {
        self.local_only = local_only;
        self
    }

    /// Wire the HTTP clients and the configured rule library
    ///
    /// # Errors
    ///
    /// Returns an error if the rule library does not load or a service URL
    /// is invalid.
    pub fn from_config(config: &NoteGuardConfig) -> Result<Self> {
        let table = match config.redaction.rule_library {
            Some(ref path) => RuleTable::from_file(path)?,
            None => RuleTable::builtin()?,
        };
        tracing::info!(
            rule_version = %table.version(),
            rules = table.len(),
            local_only = config.redaction.local_only,
            "Rule table loaded"
        );

        let redactor = LocalRedactor::new(Arc::new(table))?;
        let analyzer = Arc::new(EntityAnalysisClient::new(&config.analyzer)?);
        let anonymizer = Arc::new(AnonymizationClient::new(&config.anonymizer)?);

        Ok(Self::new(redactor, analyzer, anonymizer).with_local_only(config.redaction.local_only))
    }

    pub fn local_redactor(&self) -> &LocalRedactor {
        &self.redactor
    }

    pub fn is_local_only(&self) -> bool {
        self.local_only
    }

    /// Redact one note and collapse the result into a [`RedactionOutcome`]
    pub async fn redact_note(&self, text: &str) -> Result<RedactionOutcome> {
        self.run(text).await.map(PipelineOutcome::into_outcome)
    }

    /// Redact one note and report which terminal state was reached
    ///
    /// # Errors
    ///
    /// Any analyzer or anonymizer failure, including a malformed response.
    /// The anonymizer answering without text is not a failure.
    pub async fn run(&self, text: &str) -> Result<PipelineOutcome> {
        self.run_opt(Some(text)).await
    }

    /// Redact a note that may be missing; a missing note runs as `""`
    pub async fn run_opt(&self, text: Option<&str>) -> Result<PipelineOutcome> {
        let span = tracing::info_span!(
            "redact_note",
            request_id = %Uuid::new_v4(),
            chars = text.map_or(0, |t| t.chars().count()),
            missing = text.is_none()
        );
        self.run_pipeline(text).instrument(span).await
    }

    async fn run_pipeline(&self, text: Option<&str>) -> Result<PipelineOutcome> {
        let started = Instant::now();

        let local = self.redactor.redact_opt(text);
        log_stage!("local", changed = local.changed);

        if self.local_only {
            let outcome = PipelineOutcome::LocalOnlyFallback {
                text: local.text,
                locally_redacted: local.changed,
                reason: FallbackReason::RemoteDisabled,
            };
            log_pipeline_complete!(outcome.state(), local.changed, started.elapsed());
            return Ok(outcome);
        }

        let entities = match self.analyzer.analyze(&local.text).await {
            Ok(entities) => entities,
            Err(e) => {
                log_pipeline_failure!(&e, "analyze");
                return Err(e);
            }
        };
        log_stage!("analyze", entities = entities.len());

        if entities.is_empty() {
            let outcome = PipelineOutcome::ShortCircuit {
                text: local.text,
                locally_redacted: local.changed,
            };
            log_pipeline_complete!(outcome.state(), local.changed, started.elapsed());
            return Ok(outcome);
        }

        let operators = build_operators(&entities);
        log_stage!("operators", entity_types = operators.len());

        let anonymized = match self
            .anonymizer
            .anonymize(&local.text, &entities, &operators)
            .await
        {
            Ok(anonymized) => anonymized,
            Err(e) => {
                log_pipeline_failure!(&e, "anonymize");
                return Err(e);
            }
        };

        let outcome = match anonymized {
            AnonymizedText::Anonymized(text) => PipelineOutcome::Anonymized {
                text,
                locally_redacted: local.changed,
            },
            AnonymizedText::Fallback(text) => PipelineOutcome::LocalOnlyFallback {
                text,
                locally_redacted: local.changed,
                reason: FallbackReason::AnonymizerReturnedNoText,
            },
        };
        log_pipeline_complete!(outcome.state(), local.changed, started.elapsed());

        Ok(outcome)
    }

    /// Probe both remote services
    pub async fn health_check(&self) -> Result<()> {
        self.analyzer.health_check().await?;
        self.anonymizer.health_check().await
    }
}
