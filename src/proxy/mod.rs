//! Proxy module
//!
//! Provider registration and request dispatch to upstream AI services.

pub mod endpoint;
pub mod headers;
pub mod ident;
pub mod logging;
pub mod provider;
pub mod registry;

pub use endpoint::{Endpoint, Example, ExampleResponse};
pub use provider::Provider;
pub use registry::Registry;
