mod docs;
/// Clinical note generation endpoint
pub mod generate;
/// Health check endpoint
pub mod health;
/// Service banner
pub mod index;

use aide::axum::{
    routing::{get, post},
    ApiRouter,
};

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler())
        .api_route("/", get(index::handler))
        .api_route("/health", get(health::handler))
        .api_route("/api/health", get(health::handler))
        .api_route("/api/generate", post(generate::handler))
}
