//! Integration tests for the Nexura gateway
//!
//! These tests drive the full router: dispatch to mocked upstream providers,
//! health probes and the documentation endpoints.

mod dispatch;
mod docs;
mod health;
