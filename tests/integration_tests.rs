//! Integration tests entry point for the Nexura gateway
//!
//! Run these tests using `cargo test --test integration_tests`.

mod common;
mod integration;
mod mocks;

// Tests are defined within the integration module:
// - integration/dispatch.rs - Dispatch route against mocked upstreams
// - integration/health.rs - Health endpoint tests
// - integration/docs.rs - Catalog and OpenAPI endpoints
