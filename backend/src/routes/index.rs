use axum::Json;
use schemars::JsonSchema;
use serde::Serialize;

/// Public endpoints advertised by the index route
pub const ENDPOINTS: [&str; 3] = ["/health", "/api/health", "/api/generate"];

/// Index route body
#[derive(Debug, Serialize, JsonSchema)]
pub struct IndexResponse {
    /// Service banner
    message: &'static str,
    /// Available endpoints
    endpoints: Vec<&'static str>,
}

/// Service banner listing the available endpoints
pub async fn handler() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Mediscript API is running",
        endpoints: ENDPOINTS.to_vec(),
    })
}
