//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::generation::GenerationError;

/// Error body returned to clients
#[derive(Debug, Serialize, JsonSchema)]
pub struct ApiErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            inner: ApiErrorResponse { error: msg.into() },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {} - {}", self.status, self.inner.error),
            500..=599 => tracing::error!("Server error: {} - {}", self.status, self.inner.error),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert generation failures to application errors
impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match &err {
            GenerationError::InvalidInput => {
                tracing::debug!("Rejected generation request without a prompt");
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            GenerationError::Unconfigured => {
                tracing::error!("OPENAI_API_KEY is not set, generation is disabled");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            GenerationError::Provider(cause) => {
                tracing::error!("OpenAI API error: {cause}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}
