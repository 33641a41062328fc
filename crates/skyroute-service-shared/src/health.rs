//! Health check handlers for Kubernetes probes.
//!
//! `/health/live` only says the process is up. `/health/ready` also reports
//! the size of the loaded network and fails when no airports were loaded.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok", or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub airports_loaded: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_edges: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub augmented_edges: Option<usize>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            airports_loaded: None,
            flight_edges: None,
            augmented_edges: None,
        }
    }

    /// Create a ready status with network sizes.
    pub fn ready(
        service: &str,
        version: &str,
        airports: usize,
        flight_edges: usize,
        augmented_edges: usize,
    ) -> Self {
        Self {
            airports_loaded: Some(airports),
            flight_edges: Some(flight_edges),
            augmented_edges: Some(augmented_edges),
            ..Self::alive(service, version)
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            ..Self::alive(service, version)
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"skyroute-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// ```text
/// GET /health/ready
/// {"status":"ok",...,"airports_loaded":7698,"flight_edges":37595,"augmented_edges":91234}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let network = state.network();
    let airports = network.catalog().len();

    if airports == 0 {
        let status = HealthStatus::not_ready(service, version, "no airports loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(
        service,
        version,
        airports,
        network.flights().edge_count(),
        network.augmented().edge_count(),
    );
    (StatusCode::OK, Json(status)).into_response()
}
