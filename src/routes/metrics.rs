//! Prometheus metrics endpoint
//!
//! Exposes dispatch metrics in Prometheus format for monitoring.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Label used when a request never resolved to a registered endpoint
pub const UNRESOLVED: &str = "unresolved";

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    let _ = &*PROMETHEUS_HANDLE;

    register_metrics();
}

fn register_metrics() {
    metrics::describe_counter!(
        "nexura_requests_total",
        "Total number of dispatched requests"
    );
    metrics::describe_histogram!(
        "nexura_request_duration_seconds",
        "Dispatch duration in seconds, including the upstream call"
    );
}

/// Prometheus metrics endpoint handler
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record one dispatch
pub fn record_request(provider: &str, endpoint: &str, status: u16, duration_secs: f64) {
    metrics::counter!(
        "nexura_requests_total",
        "provider" => provider.to_string(),
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "nexura_request_duration_seconds",
        "provider" => provider.to_string(),
        "endpoint" => endpoint.to_string()
    )
    .record(duration_secs);
}
