//! HTTP plumbing shared by the analyzer and anonymizer clients

use crate::config::{bearer_value, SecretString};
use crate::domain::{NoteGuardError, PresidioError, RemoteStage, Result};
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Longest response body kept in a status error
const MAX_ERROR_BODY: usize = 512;

/// Connection settings for one remote service
pub(crate) struct ServiceEndpoint {
    stage: RemoteStage,
    base_url: Url,
    client: Client,
    api_key: Option<SecretString>,
}

impl ServiceEndpoint {
    pub(crate) fn new(
        stage: RemoteStage,
        base_url: &str,
        timeout_seconds: u64,
        connect_timeout_seconds: u64,
        api_key: Option<SecretString>,
    ) -> Result<Self> {
        let base_url = parse_base_url(stage, base_url)?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_seconds))
            .connect_timeout(Duration::from_secs(connect_timeout_seconds))
            .build()
            .map_err(|e| {
                NoteGuardError::Configuration(format!("Failed to build {stage} HTTP client: {e}"))
            })?;

        Ok(Self {
            stage,
            base_url,
            client,
            api_key,
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| {
            NoteGuardError::Configuration(format!(
                "Invalid {} endpoint '{path}': {e}",
                self.stage
            ))
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.api_key {
            Some(ref key) => request.header(reqwest::header::AUTHORIZATION, bearer_value(key)),
            None => request,
        }
    }

    /// POST `body` as JSON to `path` and parse the JSON response
    ///
    /// A JSON `null` body parses as `None`.
    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        let request = self.authorize(self.client.post(url).json(body));
        let response = request.send().await.map_err(|e| self.transport(e))?;
        let response = self.check_status(response).await?;

        let bytes = response.bytes().await.map_err(|e| self.transport(e))?;
        serde_json::from_slice::<Option<T>>(&bytes).map_err(|e| {
            PresidioError::MalformedResponse {
                stage: self.stage,
                message: e.to_string(),
            }
            .into()
        })
    }

    /// GET `<base>/health`
    pub(crate) async fn health(&self) -> Result<()> {
        let url = self.url("health")?;
        let request = self.authorize(self.client.get(url));
        let response = request.send().await.map_err(|e| self.transport(e))?;
        self.check_status(response).await?;
        Ok(())
    }

    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let mut body = response.text().await.unwrap_or_default();
        truncate_at_char_boundary(&mut body, MAX_ERROR_BODY);

        Err(PresidioError::Status {
            stage: self.stage,
            status: status.as_u16(),
            body,
        }
        .into())
    }

    fn transport(&self, error: reqwest::Error) -> NoteGuardError {
        PresidioError::Transport {
            stage: self.stage,
            message: error.to_string(),
        }
        .into()
    }
}

/// Parse a base URL so that relative joins append to its path
fn parse_base_url(stage: RemoteStage, base_url: &str) -> Result<Url> {
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    };

    let url = Url::parse(&normalized).map_err(|e| {
        NoteGuardError::Configuration(format!("Invalid {stage} base URL '{base_url}': {e}"))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(NoteGuardError::Configuration(format!(
            "Unsupported {stage} URL scheme '{scheme}'; use http or https"
        ))),
    }
}

fn truncate_at_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}
