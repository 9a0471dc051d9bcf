//! OpenAPI description of the gateway's own HTTP surface
//!
//! Upstream request shapes are described by the catalog, not here.

use utoipa::OpenApi;

use crate::error::{ErrorBody, ErrorResponse};
use crate::routes::health::{
    HealthResponse, HealthStats, HealthStatus, ProviderHealth, SimpleHealthResponse,
};

/// OpenAPI specification for the Nexura gateway
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nexura Gateway API",
        version = "0.1.0",
        description = "Uniform dispatch route in front of third-party AI providers"
    ),
    paths(
        crate::routes::dispatch::dispatch,
        crate::routes::health::health_check,
        crate::routes::health::readiness_check,
        crate::routes::health::liveness_check,
    ),
    components(
        schemas(
            ErrorBody,
            ErrorResponse,
            HealthStatus,
            ProviderHealth,
            HealthStats,
            HealthResponse,
            SimpleHealthResponse,
        )
    ),
    tags(
        (name = "Dispatch", description = "Forwarding to upstream providers"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
pub struct GatewayApiDoc;
