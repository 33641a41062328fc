//! Shared infrastructure for SkyRoute HTTP microservices.
//!
//! - [`AppState`]: the route network, loaded once before the server binds
//! - [`health`]: liveness/readiness handlers
//! - [`ProblemDetails`]: RFC 9457 problem documents for error responses
//! - [`ServiceResponse`]: wrapper for successful responses
//! - [`metrics`]: Prometheus recorder and business metrics
//! - [`logging`]: structured JSON or text logging
//! - [`middleware`]: request ids and HTTP metrics
//! - request types with validation for each endpoint
//!
//! Handlers stay thin: parse, validate, call `skyroute-lib`, format.
//!
//! # Testing Support
//!
//! [`test_utils`] loads the fixture dataset into an `AppState`. Enable the
//! `test-utils` feature to use it from dependent crates.

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_airports_queried, record_route_calculated,
    record_route_failed, record_route_legs, record_search_explored, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, normalize_path, MetricsLayer, RequestId};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_NOT_CONNECTED, PROBLEM_SERVICE_UNAVAILABLE, PROBLEM_UNKNOWN_AIRPORT,
};
pub use request::{AirportRequest, RouteQuery, RouteRequest, Validate, MAX_HOP_CEILING};
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError};
