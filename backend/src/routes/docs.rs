use std::sync::Arc;

use aide::{axum::ApiRouter, openapi::OpenApi, scalar::Scalar};
use axum::http::StatusCode;
use axum::{response::IntoResponse, routing::get, Extension, Json};

use crate::types::Config;

pub fn handler() -> ApiRouter {
    let scalar = Scalar::new("/openapi.json").with_title("Mediscript API Docs");

    ApiRouter::new()
        .route("/docs", scalar.axum_route())
        .route("/openapi.json", get(openapi_schema))
}

#[allow(clippy::unused_async)]
async fn openapi_schema(
    Extension(config): Extension<Arc<Config>>,
    Extension(openapi): Extension<Arc<OpenApi>>,
) -> impl IntoResponse {
    if !config.environment.show_api_docs() {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(openapi.as_ref().clone()).into_response()
}
