use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, info, instrument};
use url::Url;

use super::GenerationBackend;
use crate::{Error, GeneratedContent, Prompt, Result, Session};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

/// Client for the remote website generation service
pub struct HttpGenerationBackend {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl HttpGenerationBackend {
    /// Creates a backend for `endpoint` with the default 30s timeout
    pub fn new(endpoint: Url) -> Result<Self> {
        Self::with_timeout(endpoint, Duration::from_secs(30))
    }

    /// Creates a backend with a custom request timeout
    pub fn with_timeout(endpoint: Url, timeout: Duration) -> Result<Self> {
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "generation endpoint must be http(s): {endpoint}"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("deepsite/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            client,
            endpoint,
            api_key: None,
        })
    }

    /// Bearer token used when the session carries none (e.g. a project anon key)
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    /// The configured service endpoint
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn bearer<'a>(&'a self, session: Option<&'a Session>) -> Option<&'a str> {
        session
            .and_then(|s| s.access_token.as_deref())
            .or(self.api_key.as_deref())
    }
}

#[async_trait]
impl GenerationBackend for HttpGenerationBackend {
    #[instrument(level = "debug", skip_all, fields(endpoint = %self.endpoint))]
    async fn generate(
        &self,
        prompt: &Prompt,
        session: Option<&Session>,
    ) -> Result<GeneratedContent> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(&GenerateRequest {
                prompt: prompt.as_str(),
            });

        if let Some(token) = self.bearer(session) {
            debug!("Attaching bearer token to generation request");
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(Error::AuthRequired(format!(
                    "generation service rejected credentials ({status})"
                )));
            }

            match response.error_for_status() {
                Ok(_) => unreachable!("Status should be an error"),
                Err(err) => return Err(Error::Network(err)),
            }
        }

        let content: GeneratedContent = response.json().await?;
        info!(
            title = %content.title,
            bytes = content.html_content.len(),
            "Received generated website"
        );

        Ok(content)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
