//! Seams between the redaction pipeline and the remote services
//!
//! The orchestrator only sees these traits. Production code plugs in the
//! HTTP clients; tests plug in fakes.

use super::models::AnonymizedText;
use crate::domain::Result;
use crate::redaction::models::{DetectedEntity, OperatorMap};
use async_trait::async_trait;

/// Detects PHI entities in text
#[async_trait]
pub trait EntityAnalyzer: Send + Sync {
    /// Return the entities found in `text`, possibly none
    ///
    /// # Errors
    ///
    /// Any transport failure, non-success status or malformed body.
    async fn analyze(&self, text: &str) -> Result<Vec<DetectedEntity>>;

    /// Probe the service
    async fn health_check(&self) -> Result<()>;
}

/// Rewrites detected entity spans according to operators
#[async_trait]
pub trait TextAnonymizer: Send + Sync {
    /// Apply `operators` to the spans in `entities`
    ///
    /// # Errors
    ///
    /// Any transport failure, non-success status or malformed body. A
    /// well-formed response without text is not an error; it comes back as
    /// [`AnonymizedText::Fallback`].
    async fn anonymize(
        &self,
        text: &str,
        entities: &[DetectedEntity],
        operators: &OperatorMap,
    ) -> Result<AnonymizedText>;

    /// Probe the service
    async fn health_check(&self) -> Result<()>;
}
