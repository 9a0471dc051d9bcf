//! Header utilities for provider proxying
//!
//! Outbound requests carry only the provider's own credentials; client
//! headers are never forwarded upstream.

use axum::http::header::{self, HeaderName};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::AppResult;

/// Content type used for every dispatched body
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Hop-by-hop headers that must never be forwarded
const HOP_BY_HOP_HEADERS: &[HeaderName] = &[
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Build the outbound headers for a provider request
///
/// Produces `Authorization: <scheme> <key>` and `Content-Type`. Without a
/// key the Authorization header is left out.
pub fn build_auth_headers(
    auth_scheme: &str,
    api_key: Option<&str>,
    content_type: &str,
) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(key) = api_key {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("{} {}", auth_scheme, key))?,
        );
    }
    headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type)?);

    Ok(headers)
}

/// Check if a header is a hop-by-hop header that should not be forwarded
pub fn is_hop_by_hop_header(name: &HeaderName) -> bool {
    HOP_BY_HOP_HEADERS.contains(name)
}

/// Filter hop-by-hop headers from an upstream response
pub fn filter_response_headers(response_headers: &HeaderMap) -> HeaderMap {
    let mut filtered = HeaderMap::new();

    for (name, value) in response_headers {
        if !is_hop_by_hop_header(name) {
            filtered.append(name.clone(), value.clone());
        }
    }

    filtered
}
