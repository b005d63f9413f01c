use std::sync::Arc;

use axum::{Extension, Json};
use tracing::instrument;

use crate::{
    generation::{GenerationRequest, GenerationResult, GenerationService},
    types::{AppError, LenientJson},
};

/// Converts free-text medical notes into structured clinical documentation
///
/// The notes are sent to the configured language model together with a fixed
/// documentation style guide. A body without a usable `prompt` is answered
/// with 400.
///
/// # Errors
///
/// - 400 `prompt is required` when the prompt is missing or blank
/// - 500 when no provider credential is configured
/// - 500 `Failed to generate documentation: <cause>` when the provider call fails
#[instrument(skip_all)]
pub async fn handler(
    Extension(generation_service): Extension<Arc<GenerationService>>,
    LenientJson(payload): LenientJson<GenerationRequest>,
) -> Result<Json<GenerationResult>, AppError> {
    let result = generation_service.generate(&payload).await?;

    Ok(Json(result))
}
