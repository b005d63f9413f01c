//! OpenAI chat completions client

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Deserialize;
use tracing::instrument;

use super::{ChatCompletion, ChatCompletionProvider, ChatCompletionRequest, ProviderError};
use crate::types::Config;

/// Connection establishment timeout
const CONNECT_TIMEOUT_SECS: u64 = 10;
/// Maximum number of idle connections to maintain per host
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;

/// Error envelope returned by the OpenAI API on non-2xx responses
#[derive(Debug, Deserialize)]
struct OpenAiErrorEnvelope {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// HTTP client for the OpenAI chat completions endpoint
pub struct OpenAiClient {
    base_url: String,
    http_client: ClientWithMiddleware,
}

impl OpenAiClient {
    /// Creates a client for `base_url` (e.g. `https://api.openai.com/v1`)
    /// whose calls are aborted after `timeout`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let reqwest_client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .user_agent(format!("mediscript/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Creates a client from the service configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Self::new(config.openai_base_url.clone(), config.openai_timeout)
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait::async_trait]
impl ChatCompletionProvider for OpenAiClient {
    #[instrument(skip_all, fields(model = %request.model))]
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion, ProviderError> {
        let response = self
            .http_client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());

            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let completion = response.json::<ChatCompletion>().await?;
        tracing::debug!(
            served_by = completion.model.as_deref().unwrap_or("unknown"),
            total_tokens = ?completion.total_tokens(),
            "Received chat completion"
        );

        Ok(completion)
    }
}

/// Pulls `error.message` out of an OpenAI error body, falling back to the raw
/// text, or to the status reason when the body is empty
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<OpenAiErrorEnvelope>(body) {
        return envelope.error.message;
    }

    let body = body.trim();
    if body.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("no error details")
            .to_string();
    }
    body.to_string()
}
