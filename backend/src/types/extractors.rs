//! Custom extractors for request bodies

use aide::operation::OperationInput;
use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use schemars::JsonSchema;

use crate::types::error::AppError;

/// JSON extractor that only rejects oversized bodies
///
/// A missing or non-JSON content type, an unparsable body, or a body of the
/// wrong shape all yield `T::default()`. Handlers then apply their own
/// validation, so a garbage body and an empty object get the same answer.
/// A body over the router's `DefaultBodyLimit` is rejected with 413.
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: serde::de::DeserializeOwned + Default + JsonSchema,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(payload)) => Ok(Self(payload)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(AppError::new(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "request body too large",
                ))
            }
            Err(rejection) => {
                tracing::debug!("Treating unreadable JSON body as empty: {rejection}");
                Ok(Self(T::default()))
            }
        }
    }
}

impl<T> OperationInput for LenientJson<T>
where
    T: JsonSchema,
{
    fn operation_input(ctx: &mut aide::generate::GenContext, operation: &mut aide::openapi::Operation) {
        // Delegate to Json<T>'s implementation since LenientJson has the same structure
        Json::<T>::operation_input(ctx, operation);
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, Deserialize, JsonSchema, PartialEq, Eq)]
    struct Payload {
        #[serde(default)]
        prompt: String,
    }

    async fn try_extract(
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> Result<Payload, AppError> {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        let request = builder.body(body.into()).unwrap();

        LenientJson::<Payload>::from_request(request, &())
            .await
            .map(|LenientJson(payload)| payload)
    }

    async fn extract(content_type: Option<&str>, body: &'static str) -> Payload {
        try_extract(content_type, body).await.unwrap()
    }

    #[tokio::test]
    async fn test_valid_json() {
        let payload = extract(Some("application/json"), r#"{"prompt":"hello"}"#).await;
        assert_eq!(payload.prompt, "hello");
    }

    #[tokio::test]
    async fn test_missing_field_defaults() {
        let payload = extract(Some("application/json"), "{}").await;
        assert_eq!(payload, Payload::default());
    }

    #[tokio::test]
    async fn test_bad_bodies_default() {
        assert_eq!(extract(Some("application/json"), "not json").await, Payload::default());
        assert_eq!(extract(Some("application/json"), "[1,2]").await, Payload::default());
        assert_eq!(extract(Some("application/json"), r#"{"prompt":5}"#).await, Payload::default());
        assert_eq!(extract(None, r#"{"prompt":"hello"}"#).await, Payload::default());
    }

    #[tokio::test]
    async fn test_body_over_default_limit_is_rejected() {
        // axum's default limit is 2 MiB when no DefaultBodyLimit layer is set
        let prompt = "a".repeat(3 * 1024 * 1024);
        let body = format!(r#"{{"prompt":"{prompt}"}}"#);

        let err = try_extract(Some("application/json"), body).await.unwrap_err();
        let response = axum::response::IntoResponse::into_response(err);

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
