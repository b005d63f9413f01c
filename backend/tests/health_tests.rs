mod common;

use common::TestSetup;
use http::StatusCode;
use mediscript::{
    generation::mock::StubProvider,
    provider::ProviderError,
    types::{Config, Environment},
};
use serde_json::json;

fn unconfigured_setup() -> TestSetup {
    TestSetup::new(
        None,
        StubProvider::failing(|| ProviderError::Transport("unreachable".to_string())),
    )
}

#[tokio::test]
async fn test_health_endpoints_ignore_configuration() {
    for context in [TestSetup::replying("unused", None), unconfigured_setup()] {
        for route in ["/health", "/api/health"] {
            let response = context
                .send_get_request(route)
                .await
                .expect("Failed to send request");

            assert_eq!(response.status(), StatusCode::OK);

            let body = context
                .parse_response_body(response)
                .await
                .expect("Failed to parse response");

            assert_eq!(body, json!({ "status": "ok" }));
        }
        assert_eq!(context.provider.calls(), 0);
    }
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let context = unconfigured_setup();

    let response = context
        .send_get_request("/")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = context
        .parse_response_body(response)
        .await
        .expect("Failed to parse response");

    assert_eq!(body["message"], "Mediscript API is running");
    assert_eq!(
        body["endpoints"],
        json!(["/health", "/api/health", "/api/generate"])
    );
}

#[tokio::test]
async fn test_openapi_document_describes_generate() {
    let context = unconfigured_setup();

    let response = context
        .send_get_request("/openapi.json")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = context
        .parse_response_body(response)
        .await
        .expect("Failed to parse response");

    assert_eq!(body["info"]["title"], "Mediscript API");
    assert!(body["paths"]["/api/generate"]["post"].is_object());
}

#[tokio::test]
async fn test_openapi_document_is_hidden_in_production() {
    let context = TestSetup::with_config(
        Config {
            environment: Environment::Production,
            ..Config::default()
        },
        StubProvider::failing(|| ProviderError::Transport("unreachable".to_string())),
    );

    let response = context
        .send_get_request("/openapi.json")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Health stays available regardless of stage
    let response = context
        .send_get_request("/health")
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let context = unconfigured_setup();

    let response = context
        .send_get_request("/static/app.js")
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
