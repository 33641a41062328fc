//! Prometheus metrics for SkyRoute services.
//!
//! This module provides:
//! - [`MetricsConfig`]: whether metrics are on and where they are served
//! - [`init_metrics`]: installs the Prometheus recorder
//! - [`metrics_handler`]: axum handler for the `/metrics` endpoint
//! - business metric helpers for route and airport queries
//!
//! # Example
//!
//! ```no_run
//! use skyroute_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g. "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Read `METRICS_ENABLED` ("false" disables) and `METRICS_PATH`.
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        let path = std::env::var("METRICS_PATH").unwrap_or_else(|_| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Install the Prometheus recorder.
///
/// Call once at startup, before anything is recorded. Metrics recorded
/// before this, or when it fails, go to the no-op recorder.
///
/// # Errors
///
/// Fails when metrics are disabled, when a recorder is already installed,
/// or when the exporter cannot be built.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// The installed Prometheus handle, if [`init_metrics`] succeeded.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Axum handler for the `/metrics` endpoint (Prometheus exposition text).
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business metrics
// =============================================================================

/// Count a successful route query.
///
/// Increments `skyroute_routes_calculated_total`.
///
/// * `strategy` - search strategy name (e.g. "oracle-pruned")
/// * `ground_hops` - whether the augmented graph was searched
pub fn record_route_calculated(strategy: &str, ground_hops: bool) {
    metrics::counter!(
        "skyroute_routes_calculated_total",
        "strategy" => strategy.to_string(),
        "graph" => graph_label(ground_hops)
    )
    .increment(1);
}

/// Count a failed route query.
///
/// Increments `skyroute_routes_failed_total`. `reason` is one of
/// "not_connected", "unknown_airport", "validation_error" or "internal".
pub fn record_route_failed(reason: &str) {
    metrics::counter!(
        "skyroute_routes_failed_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Record the leg count of a successful route in `skyroute_route_legs`.
pub fn record_route_legs(legs: usize, strategy: &str) {
    metrics::histogram!(
        "skyroute_route_legs",
        "strategy" => strategy.to_string()
    )
    .record(legs as f64);
}

/// Record how many partial paths a search explored.
pub fn record_search_explored(explored: usize, strategy: &str) {
    metrics::histogram!(
        "skyroute_search_explored_paths",
        "strategy" => strategy.to_string()
    )
    .record(explored as f64);
}

/// Count an airport lookup. `outcome` is "found" or "not_found".
pub fn record_airports_queried(outcome: &str) {
    metrics::counter!(
        "skyroute_airports_queried_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

fn graph_label(ground_hops: bool) -> &'static str {
    if ground_hops {
        "augmented"
    } else {
        "flights"
    }
}
