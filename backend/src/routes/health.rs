use aide::axum::IntoApiResponse;
use axum::Json;
use schemars::JsonSchema;
use serde::Serialize;

/// Health check body
#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process is serving requests
    status: &'static str,
}

/// Health check endpoint
///
/// Used for liveness and readiness checks. Has no dependencies, so it answers `ok`
/// whether or not a provider credential is configured.
pub async fn handler() -> impl IntoApiResponse {
    Json(HealthResponse { status: "ok" })
}
