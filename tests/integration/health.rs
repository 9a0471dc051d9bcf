//! Health endpoint integration tests
//!
//! Tests for the health check endpoints:
//! - GET /health - Full health check with provider summary
//! - GET /health/ready - Readiness probe
//! - GET /health/live - Liveness probe

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::{create_test_server, test_config};

#[tokio::test]
async fn test_health_reports_registered_providers() {
    let server = create_test_server(test_config("http://127.0.0.1:9"));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["stats"]["providers"], 2);
    assert_eq!(body["stats"]["endpoints"], 2);
    assert_eq!(body["providers"][0]["id"], "openai");
    assert_eq!(body["providers"][1]["id"], "edenai");
    assert_eq!(body["providers"][1]["has_api_key"], true);
}

#[tokio::test]
async fn test_health_is_degraded_without_api_key() {
    let mut config = test_config("http://127.0.0.1:9");
    config.openai_api_key = None;
    let server = create_test_server(config);

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "degraded");
}

#[tokio::test]
async fn test_not_ready_when_every_provider_is_disabled() {
    let mut config = test_config("http://127.0.0.1:9");
    config.openai_enabled = false;
    config.edenai_enabled = false;
    let server = create_test_server(config);

    let response = server.get("/health/ready").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["status"], "unhealthy");

    // Liveness does not depend on providers
    server.get("/health/live").await.assert_status_ok();
}

#[tokio::test]
async fn test_ready_and_live() {
    let server = create_test_server(test_config("http://127.0.0.1:9"));

    let response = server.get("/health/ready").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");

    server.get("/health/live").await.assert_status_ok();
}

#[tokio::test]
async fn test_health_endpoints_reject_post() {
    let server = create_test_server(test_config("http://127.0.0.1:9"));

    server
        .post("/health")
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    server
        .post("/health/live")
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
