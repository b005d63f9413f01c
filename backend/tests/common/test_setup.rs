use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use mediscript::{
    generation::{mock::StubProvider, GenerationService},
    provider::ChatCompletion,
    server,
    types::Config,
};
use tower::ServiceExt;

/// Credential used by configured test setups
pub const TEST_API_KEY: &str = "sk-test";

/// Initialize tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Router wired to a stub provider
pub struct TestSetup {
    pub router: Router,
    pub config: Arc<Config>,
    pub provider: Arc<StubProvider>,
}

impl TestSetup {
    /// Setup serving `provider` behind a service configured with `api_key`
    pub fn new(api_key: Option<&str>, provider: StubProvider) -> Self {
        Self::with_config(
            Config {
                openai_api_key: api_key.map(ToString::to_string),
                ..Config::default()
            },
            provider,
        )
    }

    /// Setup serving `provider` behind a service built from `config`
    pub fn with_config(config: Config, provider: StubProvider) -> Self {
        setup_test_env();

        let config = Arc::new(config);
        let provider = Arc::new(provider);
        let generation_service = Arc::new(GenerationService::from_config(
            provider.clone(),
            &config,
        ));

        let router = server::router(config.clone(), generation_service);

        Self {
            router,
            config,
            provider,
        }
    }

    /// Configured setup whose provider answers with `text` and `total_tokens`
    pub fn replying(text: &str, total_tokens: Option<u32>) -> Self {
        Self::new(
            Some(TEST_API_KEY),
            StubProvider::replying(ChatCompletion::from_text(text, total_tokens)),
        )
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        self.send_raw_post_request(route, Some("application/json"), payload.to_string())
            .await
    }

    pub async fn send_raw_post_request(
        &self,
        route: &str,
        content_type: Option<&str>,
        body: String,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let mut builder = Request::builder().uri(route).method("POST");
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        let request = builder.body(Body::from(body))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn parse_response_body(
        &self,
        response: Response,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        use http_body_util::BodyExt;

        let body = response.into_body().collect().await?.to_bytes();
        let json = serde_json::from_slice(&body)?;
        Ok(json)
    }
}
