//! Documentation endpoint integration tests
//!
//! - GET /docs/catalog.json - live provider catalog
//! - GET /docs/openapi.json - gateway OpenAPI document
//! - X-Docs-Key protection when a docs key is configured

use axum::http::{HeaderName, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::{constants::TEST_DOCS_KEY, create_test_server, test_config};

#[tokio::test]
async fn test_catalog_lists_enabled_providers() {
    let server = create_test_server(test_config("http://127.0.0.1:9"));

    let response = server.get("/docs/catalog.json").await;

    response.assert_status_ok();
    let catalog = response.json::<Value>();

    let mut providers: Vec<_> = catalog.as_object().unwrap().keys().cloned().collect();
    providers.sort();
    assert_eq!(providers, vec!["edenai".to_string(), "openai".to_string()]);

    // `Value` sorts keys, so registration order is checked on the raw text
    let text = response.text();
    let openai_at = text.find("\"openai\":").unwrap();
    let edenai_at = text.find("\"edenai\":").unwrap();
    assert!(openai_at < edenai_at);

    let completions = &catalog["openai"]["endpoints"]["Chat Completions"];
    assert_eq!(completions["method"], "POST");
    assert_eq!(completions["path"], "/v1/chat/completions");
    assert_eq!(
        completions["nexuraPath"],
        "http://localhost/api/openai/chat-completions"
    );

    let model = completions["request_type"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == "model")
        .unwrap();
    assert_eq!(model["genericType"], "Literal");
    assert!(model["type"].as_str().unwrap().contains("gpt-4o-mini"));
    assert_eq!(model["required"], true);
    assert_eq!(model["default"], Value::Null);

    let chat = &catalog["edenai"]["endpoints"]["Chat"];
    assert_eq!(chat["examples"][0]["response"]["type"], "json");
}

#[tokio::test]
async fn test_catalog_skips_disabled_provider() {
    let mut config = test_config("http://127.0.0.1:9");
    config.openai_enabled = false;
    let server = create_test_server(config);

    let catalog = server.get("/docs/catalog.json").await.json::<Value>();

    assert!(catalog.get("openai").is_none());
    assert!(catalog.get("edenai").is_some());
}

#[tokio::test]
async fn test_openapi_json_structure() {
    let server = create_test_server(test_config("http://127.0.0.1:9"));

    let response = server.get("/docs/openapi.json").await;

    response.assert_status_ok();
    let spec = response.json::<Value>();
    assert!(spec["info"]["title"].as_str().unwrap().contains("Nexura"));
    assert!(spec["paths"]["/api/{provider}/{endpoint}"].is_object());
}

#[tokio::test]
async fn test_docs_return_404_without_key() {
    let mut config = test_config("http://127.0.0.1:9");
    config.docs_api_key = Some(TEST_DOCS_KEY.to_string());
    let server = create_test_server(config);

    server
        .get("/docs/catalog.json")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .get("/docs/openapi.json")
        .add_header(
            HeaderName::from_static("x-docs-key"),
            HeaderValue::from_static("wrong-key"),
        )
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_docs_accessible_with_correct_key() {
    let mut config = test_config("http://127.0.0.1:9");
    config.docs_api_key = Some(TEST_DOCS_KEY.to_string());
    let server = create_test_server(config);

    server
        .get("/docs/catalog.json")
        .add_header(
            HeaderName::from_static("x-docs-key"),
            HeaderValue::from_static(TEST_DOCS_KEY),
        )
        .await
        .assert_status_ok();
}
