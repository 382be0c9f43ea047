//! Logging and observability
//!
//! Structured logging with configurable levels and optional rolling JSON
//! files. Log events carry counts, states, durations and identifiers; note
//! text never appears in a log field.
//!
//! # Example
//!
//! ```no_run
//! use noteguard::logging::init_logging;
//! use noteguard::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a pipeline stage transition
///
/// # Example
///
/// ```no_run
/// use noteguard::log_stage;
///
/// log_stage!("analyze", entities = 3);
/// ```
#[macro_export]
macro_rules! log_stage {
    ($stage:expr) => {
        tracing::debug!(stage = $stage, "Pipeline stage completed");
    };
    ($stage:expr, $($field:tt)+) => {
        tracing::debug!(stage = $stage, $($field)+, "Pipeline stage completed");
    };
}

/// Log the terminal state of a pipeline run
///
/// # Example
///
/// ```no_run
/// use noteguard::log_pipeline_complete;
/// use std::time::Duration;
///
/// log_pipeline_complete!("short_circuit", true, Duration::from_millis(12));
/// ```
#[macro_export]
macro_rules! log_pipeline_complete {
    ($state:expr, $locally_redacted:expr, $duration:expr) => {
        tracing::info!(
            state = $state,
            locally_redacted = $locally_redacted,
            duration_ms = $duration.as_millis() as u64,
            "Redaction pipeline finished"
        );
    };
}

/// Log a pipeline failure
///
/// # Example
///
/// ```no_run
/// use noteguard::log_pipeline_failure;
/// use noteguard::domain::NoteGuardError;
///
/// let error = NoteGuardError::Validation("bad input".to_string());
/// log_pipeline_failure!(&error, "analyze");
/// ```
#[macro_export]
macro_rules! log_pipeline_failure {
    ($error:expr, $stage:expr) => {
        tracing::error!(
            error = %$error,
            stage = $stage,
            "Redaction pipeline failed"
        );
    };
}
