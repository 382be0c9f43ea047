//! Entity analysis client
//!
//! Sends `{text, language, score_threshold}` to `POST <base>/analyze` and
//! returns the reported entities unchanged. Language and threshold are fixed;
//! entities below the threshold are dropped by the service, not here.

use super::http::ServiceEndpoint;
use super::models::AnalyzeRequest;
use super::traits::EntityAnalyzer;
use crate::config::AnalyzerConfig;
use crate::domain::{RemoteStage, Result};
use crate::redaction::models::DetectedEntity;
use async_trait::async_trait;

/// Language code sent with every analyze request
pub const ANALYZER_LANGUAGE: &str = "en";

/// Minimum entity score requested from the analyzer
pub const ANALYZER_SCORE_THRESHOLD: f64 = 0.6;

/// HTTP client for the entity analyzer service
///
/// # Example
///
/// ```no_run
/// use noteguard::adapters::presidio::{EntityAnalysisClient, EntityAnalyzer};
/// use noteguard::config::AnalyzerConfig;
///
/// # async fn example() -> noteguard::domain::Result<()> {
/// let client = EntityAnalysisClient::new(&AnalyzerConfig::default())?;
/// let entities = client.analyze("Patient John Smith").await?;
/// println!("{} entities", entities.len());
/// # Ok(())
/// # }
/// ```
pub struct EntityAnalysisClient {
    endpoint: ServiceEndpoint,
}

impl EntityAnalysisClient {
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        let endpoint = ServiceEndpoint::new(
            RemoteStage::Analyzer,
            &config.base_url,
            config.timeout_seconds,
            config.connect_timeout_seconds,
            config.api_key.clone(),
        )?;

        Ok(Self { endpoint })
    }

    pub fn base_url(&self) -> &str {
        self.endpoint.base_url()
    }
}

#[async_trait]
impl EntityAnalyzer for EntityAnalysisClient {
    async fn analyze(&self, text: &str) -> Result<Vec<DetectedEntity>> {
        let request = AnalyzeRequest {
            text,
            language: ANALYZER_LANGUAGE,
            score_threshold: ANALYZER_SCORE_THRESHOLD,
        };

        let entities: Vec<DetectedEntity> = self
            .endpoint
            .post_json("analyze", &request)
            .await?
            .unwrap_or_default();

        tracing::debug!(entities = entities.len(), "Analyzer responded");
        Ok(entities)
    }

    async fn health_check(&self) -> Result<()> {
        self.endpoint.health().await
    }
}
