//! Clinical note generation
//!
//! [`GenerationService::generate`] validates the caller's notes, wraps them in
//! the fixed instructions from [`prompt`], makes a single provider call and
//! normalises the completion. Each call is independent: the service keeps no
//! state between requests and never retries.

pub mod prompt;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::provider::{ChatCompletionProvider, ChatCompletionRequest, ChatMessage, ProviderError};
use crate::types::Config;

/// Upper bound on generated tokens
pub const MAX_TOKENS: u32 = 1200;
/// Low temperature keeps the tone deterministic and professional
pub const TEMPERATURE: f32 = 0.3;
/// Nucleus sampling threshold
pub const TOP_P: f32 = 0.9;

/// Notes submitted for conversion
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct GenerationRequest {
    /// Free-text medical notes
    #[serde(default)]
    pub prompt: String,
}

/// Generated clinical documentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GenerationResult {
    /// Always `true`
    pub ok: bool,
    /// Generated documentation, whitespace trimmed
    pub message: String,
    /// Model that was requested
    pub model: String,
    /// Total tokens consumed, when the provider reports it
    pub tokens_used: Option<u32>,
}

/// Reasons a generation request fails
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Prompt was missing or blank
    #[error("prompt is required")]
    InvalidInput,

    /// No provider credential is configured
    #[error("OpenAI API key not configured. Please set OPENAI_API_KEY in your environment variables.")]
    Unconfigured,

    /// The provider call failed
    #[error("Failed to generate documentation: {0}")]
    Provider(#[from] ProviderError),
}

/// Turns raw notes into structured clinical documentation
pub struct GenerationService {
    provider: Arc<dyn ChatCompletionProvider>,
    api_key: Option<String>,
    model: String,
}

impl GenerationService {
    /// Creates a service that calls `provider` with `api_key` and `model`.
    /// An empty or missing key leaves the service unconfigured.
    #[must_use]
    pub fn new(
        provider: Arc<dyn ChatCompletionProvider>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: model.into(),
        }
    }

    /// Creates a service using the credential and model from `config`
    #[must_use]
    pub fn from_config(provider: Arc<dyn ChatCompletionProvider>, config: &Config) -> Self {
        Self::new(
            provider,
            config.openai_api_key.clone(),
            config.openai_model.clone(),
        )
    }

    /// Whether a credential is available
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Model requested from the provider
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Builds the two-message exchange for already-trimmed notes
    #[must_use]
    pub fn build_request(&self, notes: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(prompt::SYSTEM_INSTRUCTION),
                ChatMessage::user(prompt::user_instruction(notes)),
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        }
    }

    /// Converts `request.prompt` into clinical documentation
    ///
    /// # Errors
    ///
    /// - [`GenerationError::InvalidInput`] if the prompt is blank
    /// - [`GenerationError::Unconfigured`] if no credential is set; the
    ///   provider is not contacted
    /// - [`GenerationError::Provider`] if the provider call fails or returns
    ///   no usable completion
    #[instrument(skip_all, fields(model = %self.model, prompt_len = request.prompt.len()))]
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let notes = request.prompt.trim();
        if notes.is_empty() {
            return Err(GenerationError::InvalidInput);
        }

        let api_key = self.api_key.as_deref().ok_or(GenerationError::Unconfigured)?;

        let completion = self
            .provider
            .complete(api_key, &self.build_request(notes))
            .await?;

        let message = completion.first_text()?.trim().to_string();
        let tokens_used = completion.total_tokens();

        tracing::info!(tokens_used = ?tokens_used, "Generated clinical documentation");

        Ok(GenerationResult {
            ok: true,
            message,
            model: self.model.clone(),
            tokens_used,
        })
    }
}
