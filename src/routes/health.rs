//! Health check endpoints
//!
//! Provides endpoints for monitoring and container orchestration:
//! - `/health` - Full health check with registry statistics
//! - `/health/ready` - Readiness probe
//! - `/health/live` - Liveness probe

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

/// Health status enum
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Registration summary for one provider
#[derive(Debug, Serialize, ToSchema)]
pub struct ProviderHealth {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    /// Whether an API key is configured for outbound calls
    pub has_api_key: bool,
    pub endpoints: usize,
}

/// Application statistics
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStats {
    pub uptime_seconds: u64,
    pub providers: usize,
    pub endpoints: usize,
}

/// Full health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
    pub providers: Vec<ProviderHealth>,
    pub stats: HealthStats,
}

/// Simple health response for liveness/readiness
#[derive(Debug, Serialize, ToSchema)]
pub struct SimpleHealthResponse {
    pub status: HealthStatus,
}

fn provider_health(state: &AppState) -> Vec<ProviderHealth> {
    state
        .registry
        .providers()
        .map(|provider| ProviderHealth {
            id: provider.id().unwrap_or_default().to_string(),
            name: provider.name.clone(),
            enabled: provider.enabled,
            has_api_key: provider.has_api_key(),
            endpoints: provider.endpoint_count(),
        })
        .collect()
}

/// Serving providers with no configured API key degrade the service
fn overall_status(providers: &[ProviderHealth]) -> HealthStatus {
    let serving: Vec<_> = providers.iter().filter(|p| p.enabled).collect();

    if serving.is_empty() {
        HealthStatus::Unhealthy
    } else if serving.iter().any(|p| !p.has_api_key) {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    }
}

/// Full health check endpoint
///
/// Returns version, uptime and a summary of every registered provider.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "At least one provider is serving", body = HealthResponse),
        (status = 503, description = "No provider is enabled", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let providers = provider_health(&state);
    let status = overall_status(&providers);
    let uptime = state.start_time.elapsed().as_secs();

    let response = HealthResponse {
        status: status.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        timestamp: chrono::Utc::now().to_rfc3339(),
        stats: HealthStats {
            uptime_seconds: uptime,
            providers: providers.len(),
            endpoints: providers.iter().map(|p| p.endpoints).sum(),
        },
        providers,
    };

    let status_code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Readiness probe endpoint
///
/// Returns 200 OK once at least one provider is enabled.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Ready to receive traffic", body = SimpleHealthResponse),
        (status = 503, description = "No provider is enabled", body = SimpleHealthResponse)
    )
)]
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SimpleHealthResponse>) {
    if overall_status(&provider_health(&state)) == HealthStatus::Unhealthy {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(SimpleHealthResponse {
                status: HealthStatus::Unhealthy,
            }),
        );
    }

    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}

/// Liveness probe endpoint
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Process is alive", body = SimpleHealthResponse)
    )
)]
pub async fn liveness_check() -> (StatusCode, Json<SimpleHealthResponse>) {
    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}
