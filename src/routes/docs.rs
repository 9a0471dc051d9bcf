//! Documentation endpoints
//!
//! Serves the live provider catalog and the gateway's OpenAPI document.
//! Protected by the X-Docs-Key header when a docs key is configured; returns
//! 404 when unauthorized to hide endpoint existence.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use utoipa::OpenApi;

use crate::{
    docs::{Catalog, CatalogGenerator, GatewayApiDoc},
    error::{AppError, AppResult},
    AppState,
};

/// Header carrying the docs key
pub const DOCS_KEY_HEADER: &str = "X-Docs-Key";

/// Middleware to protect docs endpoints with the configured key
///
/// Allows access when no key is configured (dev mode).
pub async fn docs_auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(expected) = state.config.docs_api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get(DOCS_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match provided {
        Some(provided) if provided == expected => Ok(next.run(request).await),
        _ => Err(StatusCode::NOT_FOUND.into_response()),
    }
}

/// Live catalog of enabled providers and endpoints
pub async fn catalog_json(State(state): State<Arc<AppState>>) -> AppResult<Json<Catalog>> {
    let catalog = CatalogGenerator::new(&state.config.public_api_url, &state.config.examples_dir)
        .generate(&state.registry)
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(catalog))
}

/// OpenAPI description of the gateway
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(GatewayApiDoc::openapi())
}
