//! API documentation
//!
//! The JSON catalog of providers and endpoints consumed by the documentation
//! site, and an OpenAPI document for the gateway routes.

pub mod catalog;
mod openapi;
pub mod tags;

pub use catalog::{write_catalog, Catalog, CatalogError, CatalogGenerator};
pub use openapi::GatewayApiDoc;
