//! Nexura - thin aggregator in front of third-party AI providers
//!
//! This library provides the provider registry, the uniform dispatch route
//! and the API catalog generator used by the documentation site.

pub mod config;
pub mod docs;
pub mod error;
pub mod providers;
pub mod proxy;
pub mod routes;
pub mod schema;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::error::{AppError, AppResult};
pub use crate::providers::build_registry;
pub use crate::proxy::{Endpoint, Provider, Registry};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub start_time: Instant,
    /// Providers and endpoints, populated before serving and read-only after
    pub registry: Arc<Registry>,
}

impl AppState {
    /// Create a new application state with the registry built from `config`
    pub fn new(config: Config) -> Result<Self> {
        // Initialize HTTP client with connection pooling
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .build()?;

        let registry = Arc::new(build_registry(&config));

        Ok(Self {
            config,
            http_client,
            start_time: Instant::now(),
            registry,
        })
    }
}
