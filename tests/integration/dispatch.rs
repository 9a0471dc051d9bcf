//! Dispatch route integration tests
//!
//! Requests go through the full router to a wiremock upstream:
//! - POST /api/{provider}/{endpoint} by endpoint identifier and by path
//! - Upstream statuses, bodies and headers are passed through
//! - Lookup and validation failures are rejected before any upstream call

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_test_server, test_config};
use crate::mocks::{MockUpstream, UpstreamTestData, OPENAI_CHAT_PATH};

#[tokio::test]
async fn test_openai_chat_is_forwarded_by_endpoint_id() {
    let upstream = MockUpstream::start().await;
    upstream
        .mock_openai_chat_success(UpstreamTestData::openai_completion())
        .await;
    let server = create_test_server(test_config(&upstream.uri()));

    let response = server
        .post("/api/openai/chat-completions")
        .json(&UpstreamTestData::openai_request())
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), UpstreamTestData::openai_completion());
    assert_eq!(response.header("x-request-id"), "req-upstream-123");
}

#[tokio::test]
async fn test_openai_chat_is_forwarded_by_upstream_path() {
    let upstream = MockUpstream::start().await;
    upstream
        .mock_openai_chat_success(UpstreamTestData::openai_completion())
        .await;
    let server = create_test_server(test_config(&upstream.uri()));

    let response = server
        .post("/api/openai/v1/chat/completions")
        .json(&UpstreamTestData::openai_request())
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_forwarded_body_omits_unset_fields() {
    let upstream = MockUpstream::start().await;
    upstream
        .mock_openai_chat_success(UpstreamTestData::openai_completion())
        .await;
    let server = create_test_server(test_config(&upstream.uri()));

    server
        .post("/api/openai/chat-completions")
        .json(&UpstreamTestData::openai_request())
        .await
        .assert_status_ok();

    let received = upstream.received().await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.path(), OPENAI_CHAT_PATH);

    let forwarded: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(forwarded["model"], "gpt-4o-mini");
    assert_eq!(forwarded["messages"][1]["role"], "user");
    assert!(forwarded.get("temperature").is_none());
    assert!(forwarded.get("stream").is_none());
}

#[tokio::test]
async fn test_edenai_chat_is_forwarded() {
    let upstream = MockUpstream::start().await;
    upstream
        .mock_edenai_chat_success(UpstreamTestData::edenai_response())
        .await;
    let server = create_test_server(test_config(&upstream.uri()));

    let response = server
        .post("/api/edenai/chat")
        .json(&UpstreamTestData::edenai_request())
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), UpstreamTestData::edenai_response());

    // Serde defaults are filled in before forwarding
    let received = upstream.received().await;
    let forwarded: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(forwarded["max_tokens"], 1000);
    assert_eq!(forwarded["tool_choice"], "auto");
}

#[tokio::test]
async fn test_upstream_error_is_passed_through() {
    let upstream = MockUpstream::start().await;
    upstream
        .mock_openai_chat_error(401, UpstreamTestData::openai_invalid_key())
        .await;
    let server = create_test_server(test_config(&upstream.uri()));

    let response = server
        .post("/api/openai/chat-completions")
        .json(&UpstreamTestData::openai_request())
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), UpstreamTestData::openai_invalid_key());
}

#[tokio::test]
async fn test_upstream_server_error_is_passed_through() {
    let upstream = MockUpstream::start().await;
    upstream
        .mock_openai_chat_error(500, json!({"error": {"message": "The server had an error"}}))
        .await;
    let server = create_test_server(test_config(&upstream.uri()));

    let response = server
        .post("/api/openai/chat-completions")
        .json(&UpstreamTestData::openai_request())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "The server had an error"
    );
}

#[tokio::test]
async fn test_unknown_provider_is_not_found() {
    let upstream = MockUpstream::start().await;
    let server = create_test_server(test_config(&upstream.uri()));

    let response = server
        .post("/api/acme/chat")
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert!(body["error"]["message"].as_str().unwrap().contains("acme"));
    assert!(upstream.received().await.is_empty());
}

#[tokio::test]
async fn test_unknown_endpoint_is_not_found() {
    let upstream = MockUpstream::start().await;
    let server = create_test_server(test_config(&upstream.uri()));

    let response = server
        .post("/api/openai/embeddings")
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_disabled_provider_is_rejected() {
    let upstream = MockUpstream::start().await;
    let mut config = test_config(&upstream.uri());
    config.edenai_enabled = false;
    let server = create_test_server(config);

    let response = server
        .post("/api/edenai/chat")
        .json(&UpstreamTestData::edenai_request())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "DISABLED");
    assert!(upstream.received().await.is_empty());
}

#[tokio::test]
async fn test_body_not_matching_schema_is_bad_request() {
    let upstream = MockUpstream::start().await;
    let server = create_test_server(test_config(&upstream.uri()));

    let response = server
        .post("/api/openai/chat-completions")
        .json(&json!({"messages": []}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "BAD_REQUEST");
    assert!(upstream.received().await.is_empty());
}

#[tokio::test]
async fn test_unknown_request_fields_are_rejected() {
    let upstream = MockUpstream::start().await;
    let server = create_test_server(test_config(&upstream.uri()));

    let mut request = UpstreamTestData::openai_request();
    request["temperature"] = json!(0.2);
    request["top_p"] = json!(0.5);

    let response = server
        .post("/api/openai/chat-completions")
        .json(&request)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("temperature"));
    assert!(upstream.received().await.is_empty());
}

#[tokio::test]
async fn test_empty_body_reports_missing_fields() {
    let upstream = MockUpstream::start().await;
    let server = create_test_server(test_config(&upstream.uri()));

    let response = server.post("/api/openai/chat-completions").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("messages"));
    assert!(upstream.received().await.is_empty());
}

#[tokio::test]
async fn test_streaming_request_is_rejected() {
    let upstream = MockUpstream::start().await;
    let server = create_test_server(test_config(&upstream.uri()));

    let mut request = UpstreamTestData::openai_request();
    request["stream"] = json!(true);

    let response = server
        .post("/api/openai/chat-completions")
        .json(&request)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(upstream.received().await.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let upstream = MockUpstream::start().await;
    let server = create_test_server(test_config(&upstream.uri()));

    let response = server
        .post("/api/openai/chat-completions")
        .text("{\"model\": ")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "INVALID_JSON");
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    // Nothing listens on the discard port
    let server = create_test_server(test_config("http://127.0.0.1:9"));

    let response = server
        .post("/api/openai/chat-completions")
        .json(&UpstreamTestData::openai_request())
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["error"]["code"], "UPSTREAM_ERROR");
}
