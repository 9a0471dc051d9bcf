//! Common test utilities for Nexura
//!
//! Builds a full application router around a configuration whose providers
//! all point at one mock upstream.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use nexura::{routes::create_router, AppState, Config};

/// Test configuration constants
pub mod constants {
    /// API key sent to the OpenAI mock
    pub const TEST_OPENAI_API_KEY: &str = "test-openai-key";
    /// API key sent to the EdenAI mock
    pub const TEST_EDENAI_API_KEY: &str = "test-edenai-key";
    /// Docs key used by the protected docs tests
    pub const TEST_DOCS_KEY: &str = "secret-docs-key";
}

/// Configuration with every provider aimed at `upstream_url`
pub fn test_config(upstream_url: &str) -> Config {
    Config::for_upstream(upstream_url)
}

/// Start a test server around the full router
pub fn create_test_server(config: Config) -> TestServer {
    let state = AppState::new(config).expect("Failed to build application state");
    TestServer::new(create_router(Arc::new(state))).expect("Failed to start test server")
}
