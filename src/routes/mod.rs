//! HTTP routes for Nexura
//!
//! This module defines all HTTP endpoints exposed by the gateway.

pub mod dispatch;
pub mod docs;
pub mod health;
pub mod metrics;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // The endpoint segment may be a multi-segment upstream path
    let api_routes = Router::new().route("/api/:provider/*endpoint", post(dispatch::dispatch));

    let docs_routes = Router::new()
        .route("/docs/catalog.json", get(docs::catalog_json))
        .route("/docs/openapi.json", get(docs::openapi_json))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            docs::docs_auth_middleware,
        ));

    // Public routes (health checks, metrics)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .merge(docs_routes)
        // Global middleware (applied to all routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
