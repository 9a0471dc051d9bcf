//! Mock upstream providers for testing
//!
//! Provides wiremock-based mocks for:
//! - POST /v1/chat/completions - OpenAI chat completions
//! - POST /v2/text/chat - EdenAI chat
//!
//! # Example
//!
//! ```rust,ignore
//! let upstream = MockUpstream::start().await;
//! upstream.mock_openai_chat_success(UpstreamTestData::openai_completion()).await;
//! let server = create_test_server(test_config(&upstream.uri()));
//! ```

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

use crate::common::constants::{TEST_EDENAI_API_KEY, TEST_OPENAI_API_KEY};

pub const OPENAI_CHAT_PATH: &str = "/v1/chat/completions";
pub const EDENAI_CHAT_PATH: &str = "/v2/text/chat";

/// Mock upstream server wrapper
pub struct MockUpstream {
    server: MockServer,
}

impl MockUpstream {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Requests the mock has seen so far
    pub async fn received(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Mock a successful chat completion; requires the OpenAI Bearer key
    pub async fn mock_openai_chat_success(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path(OPENAI_CHAT_PATH))
            .and(header(
                "Authorization",
                format!("Bearer {}", TEST_OPENAI_API_KEY).as_str(),
            ))
            .and(header("Content-Type", "application/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body)
                    .insert_header("x-request-id", "req-upstream-123"),
            )
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mock an OpenAI error status with a JSON error body
    pub async fn mock_openai_chat_error(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(OPENAI_CHAT_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock a successful EdenAI chat; requires the EdenAI Bearer key
    pub async fn mock_edenai_chat_success(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path(EDENAI_CHAT_PATH))
            .and(header(
                "Authorization",
                format!("Bearer {}", TEST_EDENAI_API_KEY).as_str(),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }
}

/// Canned upstream payloads
pub struct UpstreamTestData;

impl UpstreamTestData {
    pub fn openai_request() -> Value {
        json!({
            "model": "gpt-4o-mini",
            "messages": [
                {"role": "system", "content": "You are a helpful assistant."},
                {"role": "user", "content": "Hello!"}
            ]
        })
    }

    pub fn openai_completion() -> Value {
        json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "gpt-4o-mini",
            "system_fingerprint": "fp_44709d6fcb",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello! How can I help you today?"},
                "logprobs": null,
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
        })
    }

    pub fn openai_invalid_key() -> Value {
        json!({
            "error": {
                "message": "Incorrect API key provided.",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        })
    }

    pub fn edenai_request() -> Value {
        json!({
            "providers": "openai",
            "fallback_providers": [],
            "text": "Hello, who are you?"
        })
    }

    pub fn edenai_response() -> Value {
        json!({
            "openai": {
                "generated_text": "I am an AI assistant.",
                "message": [
                    {"role": "user", "message": "Hello, who are you?"},
                    {"role": "assistant", "message": "I am an AI assistant."}
                ],
                "status": "success",
                "cost": 0.00012
            }
        })
    }
}
