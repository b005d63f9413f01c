//! Chat-completion provider abstraction
//!
//! The generation service talks to the language model through the
//! [`ChatCompletionProvider`] trait. [`openai::OpenAiClient`] is the only
//! production implementation; tests substitute a stub.

pub mod openai;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use openai::OpenAiClient;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the whole exchange
    System,
    /// Content supplied on behalf of the end user
    User,
    /// Earlier model output replayed as context
    Assistant,
}

/// One role-tagged message in a chat exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author of the message
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Creates a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Chat completion request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Ordered conversation
    pub messages: Vec<ChatMessage>,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling threshold
    pub top_p: f32,
}

/// Chat completion response body. Fields the service does not read are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletion {
    /// Model that served the request, as reported by the provider
    #[serde(default)]
    pub model: Option<String>,
    /// Candidate completions
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Token accounting, when reported
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One candidate completion
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    /// Generated message
    #[serde(default)]
    pub message: ChoiceMessage,
}

/// Generated message inside a choice
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    /// Generated text; absent for refusals and tool calls
    #[serde(default)]
    pub content: Option<String>,
}

/// Token accounting
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Usage {
    /// Prompt plus completion tokens
    #[serde(default)]
    pub total_tokens: Option<u32>,
}

impl ChatCompletion {
    /// Builds a single-choice completion
    #[must_use]
    pub fn from_text(text: impl Into<String>, total_tokens: Option<u32>) -> Self {
        Self {
            model: None,
            choices: vec![Choice {
                message: ChoiceMessage {
                    content: Some(text.into()),
                },
            }],
            usage: total_tokens.map(|total| Usage {
                total_tokens: Some(total),
            }),
        }
    }

    /// Text of the first choice
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MalformedResponse`] if there are no choices or
    /// the first choice carries no text.
    pub fn first_text(&self) -> Result<&str, ProviderError> {
        let choice = self.choices.first().ok_or_else(|| {
            ProviderError::MalformedResponse("response contained no choices".to_string())
        })?;

        choice.message.content.as_deref().ok_or_else(|| {
            ProviderError::MalformedResponse("completion has no text content".to_string())
        })
    }

    /// Total tokens reported by the provider
    #[must_use]
    pub fn total_tokens(&self) -> Option<u32> {
        self.usage.and_then(|usage| usage.total_tokens)
    }
}

/// Errors raised while calling the provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure: DNS, connect, TLS, timeout, or a broken body
    #[error("request to provider failed: {0}")]
    Transport(String),

    /// Provider answered with a non-success status
    #[error("provider returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Provider supplied error message
        message: String,
    },

    /// Response could not be understood
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::MalformedResponse(err.to_string());
        }
        if err.is_timeout() {
            return Self::Transport(format!("timed out: {err}"));
        }
        Self::Transport(err.to_string())
    }
}

impl From<reqwest_middleware::Error> for ProviderError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(err) => err.into(),
            reqwest_middleware::Error::Middleware(err) => Self::Transport(err.to_string()),
        }
    }
}

/// Something that can turn a chat exchange into a completion
#[async_trait::async_trait]
pub trait ChatCompletionProvider: Send + Sync {
    /// Submits `request` authenticated with `api_key`
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion, ProviderError>;
}
