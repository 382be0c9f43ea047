//! PHI redaction pipeline
//!
//! - [`rules`] - the versioned rule table, loaded once and shared read-only
//! - [`local`] - rule passes plus the [`names`] heuristic
//! - [`operators`] - one replace operator per detected entity type
//! - [`orchestrator`] - local pass, analysis, anonymization
//! - [`visits`] - per-visit wrapper that never leaks a raw note on failure

pub mod local;
pub mod models;
pub mod names;
pub mod operators;
pub mod orchestrator;
pub mod placeholder;
pub mod rules;
pub mod visits;

pub use local::{LocalRedaction, LocalRedactor, RedactionPass, RedactionReport, RuleHit};
pub use models::{
    AnonymizationOperator, DetectedEntity, FallbackReason, OperatorKind, OperatorMap,
    PipelineOutcome, RedactionOutcome,
};
pub use operators::build_operators;
pub use orchestrator::RedactionOrchestrator;
pub use rules::{RedactionRule, RuleCategory, RuleTable};
pub use visits::{VisitRedactionSummary, VisitRedactor};
