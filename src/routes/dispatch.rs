//! Uniform dispatch route
//!
//! `POST /api/{provider}/{endpoint...}` resolves the provider and endpoint in
//! the registry, forwards the JSON body and streams the upstream response
//! back unchanged apart from hop-by-hop headers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    proxy::{headers::filter_response_headers, Endpoint, Provider, Registry},
    routes::metrics::{record_request, UNRESOLVED},
    AppState,
};

/// Forward a request to an upstream provider
///
/// The endpoint segment is either the endpoint identifier or its upstream
/// path. The body must match the endpoint's request schema, as published in
/// the catalog. Upstream statuses and bodies are returned verbatim.
#[utoipa::path(
    post,
    path = "/api/{provider}/{endpoint}",
    tag = "Dispatch",
    params(
        ("provider" = String, Path, description = "Provider identifier, e.g. `openai`"),
        ("endpoint" = String, Path, description = "Endpoint identifier or upstream path, e.g. `chat-completions`")
    ),
    request_body(
        content = serde_json::Value,
        content_type = "application/json",
        description = "Request body in the endpoint's schema"
    ),
    responses(
        (status = 200, description = "Upstream response, passed through unchanged"),
        (status = 400, description = "Body does not match the endpoint's request schema", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown or disabled provider or endpoint", body = crate::error::ErrorResponse),
        (status = 502, description = "Upstream could not be reached", body = crate::error::ErrorResponse)
    )
)]
pub async fn dispatch(
    State(state): State<Arc<AppState>>,
    Path((provider_id, endpoint_ref)): Path<(String, String)>,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();

    // Labels come from the same lookup that dispatches the request
    let (provider_label, endpoint_label, response) =
        match state.registry.resolve(&provider_id, &endpoint_ref) {
            Ok((provider, endpoint)) => {
                let response = match forward(&state.http_client, provider, endpoint, &body).await {
                    Ok(response) => response,
                    Err(e) => e.into_response(),
                };
                (
                    provider.id().unwrap_or(UNRESOLVED),
                    endpoint.id().unwrap_or(UNRESOLVED),
                    response,
                )
            }
            Err(e) => {
                warn!(
                    provider_id = %provider_id,
                    endpoint = %endpoint_ref,
                    error = %e,
                    "Dispatch target not resolved"
                );
                (UNRESOLVED, UNRESOLVED, e.into_response())
            }
        };

    let duration = start_time.elapsed().as_secs_f64();
    record_request(
        provider_label,
        endpoint_label,
        response.status().as_u16(),
        duration,
    );

    info!(
        provider_id = %provider_id,
        endpoint = %endpoint_ref,
        status = %response.status(),
        duration_ms = %format!("{:.2}", duration * 1000.0),
        "Dispatch completed"
    );

    response
}

/// Parse the body (empty counts as `{}`) and send it to the resolved endpoint
async fn forward(
    client: &reqwest::Client,
    provider: &Provider,
    endpoint: &Endpoint,
    body: &[u8],
) -> AppResult<Response> {
    let payload: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(body)?
    };

    let upstream = Registry::dispatch(client, provider, endpoint, payload).await?;

    convert_response(upstream)
}

/// Turn an upstream response into an axum response, streaming the body
pub fn convert_response(upstream: reqwest::Response) -> AppResult<Response> {
    let status = StatusCode::from_u16(upstream.status().as_u16())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid upstream status: {}", e)))?;
    let headers = filter_response_headers(upstream.headers());

    let mut response = Response::builder()
        .status(status)
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build response: {}", e)))?;
    *response.headers_mut() = headers;

    Ok(response)
}
