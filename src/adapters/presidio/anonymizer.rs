//! Anonymization client

use super::http::ServiceEndpoint;
use super::models::{AnonymizeRequest, AnonymizeResponse, AnonymizedText};
use super::traits::TextAnonymizer;
use crate::config::AnonymizerConfig;
use crate::domain::{RemoteStage, Result};
use crate::redaction::models::{DetectedEntity, OperatorMap};
use async_trait::async_trait;

/// HTTP client for the anonymizer service (`POST <base>/anonymize`)
pub struct AnonymizationClient {
    endpoint: ServiceEndpoint,
}

impl AnonymizationClient {
    pub fn new(config: &AnonymizerConfig) -> Result<Self> {
        let endpoint = ServiceEndpoint::new(
            RemoteStage::Anonymizer,
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
impl TextAnonymizer for AnonymizationClient {
    async fn anonymize(
        &self,
        text: &str,
        entities: &[DetectedEntity],
        operators: &OperatorMap,
    ) -> Result<AnonymizedText> {
        let request = AnonymizeRequest {
            text,
            analyzer_results: entities,
            operators,
        };

        let response: AnonymizeResponse = self
            .endpoint
            .post_json("anonymize", &request)
            .await?
            .unwrap_or_default();

        match response.text {
            Some(anonymized) => Ok(AnonymizedText::Anonymized(anonymized)),
            None => {
                tracing::warn!("Anonymizer response had no text, keeping the analyzed text");
                Ok(AnonymizedText::Fallback(text.to_string()))
            }
        }
    }

    async fn health_check(&self) -> Result<()> {
        self.endpoint.health().await
    }
}
