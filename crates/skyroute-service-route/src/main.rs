//! SkyRoute route planning HTTP microservice.
//!
//! Answers "cheapest route between two airports using at most K legs" over
//! the OpenFlights dataset, loaded once at startup.
//!
//! # Endpoints
//!
//! - `GET /routes/{source}/{destination}` - route query via path and query string
//! - `POST /api/v1/route` - same query as a JSON body
//! - `GET /airports/{code}` - airport lookup by IATA or ICAO code
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//!
//! # Configuration
//!
//! - `SKYROUTE_DATA_DIR` - directory with `airports.dat` and `routes.dat`
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)

use std::env;
use std::net::SocketAddr;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use skyroute_lib::{plan_route, Airport, Error as LibError, RouteSummary};
use skyroute_service_shared::{
    extract_or_generate_request_id, from_lib_error, health_live, health_ready, init_logging,
    init_metrics, metrics_handler, record_airports_queried, record_route_calculated,
    record_route_failed, record_route_legs, record_search_explored, AirportRequest, AppState,
    LoggingConfig, MetricsConfig, MetricsLayer, ProblemDetails, RouteQuery, RouteRequest,
    ServiceResponse, Validate,
};

/// Route response returned to the caller.
#[derive(Debug, Serialize)]
struct RouteResponse {
    source: String,
    destination: String,
    /// Total great-circle kilometres.
    distance: f64,
    /// Display codes of every stop, origin first.
    hops: Vec<String>,
    /// Number of legs; a ground continuation is part of its flight leg.
    legs: usize,
    allowed_hops: usize,
    strategy: String,
    /// Partial paths the search examined.
    explored: usize,
}

impl From<RouteSummary> for RouteResponse {
    fn from(summary: RouteSummary) -> Self {
        Self {
            hops: summary.codes(),
            source: summary.source.code,
            destination: summary.destination.code,
            distance: summary.distance,
            legs: summary.legs,
            allowed_hops: summary.hop_ceiling,
            strategy: summary.strategy.to_string(),
            explored: summary.explored,
        }
    }
}

/// Airport lookup response.
#[derive(Debug, Serialize)]
struct AirportResponse {
    id: i64,
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    iata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icao: Option<String>,
    name: String,
    city: String,
    country: String,
    latitude: f64,
    longitude: f64,
    /// Direct flights departing this airport.
    departures: usize,
    /// Airports reachable by ground from here.
    ground_connections: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("route");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let data_dir = env::var_os(skyroute_lib::DATA_DIR_ENV).map(std::path::PathBuf::from);
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!(
        data_dir = ?data_dir,
        port = port,
        "starting route service"
    );

    let state = AppState::load(data_dir.as_deref()).map_err(|e| {
        error!(error = %e, "failed to load application state");
        e
    })?;

    info!(state = ?state, "application state loaded");

    let app = app(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn app(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/routes/{source}/{destination}", get(route_query_handler))
        .route("/api/v1/route", post(route_handler))
        .route("/airports/{code}", get(airport_handler))
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(MetricsLayer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle GET /routes/{source}/{destination}.
async fn route_query_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((source, destination)): Path<(String, String)>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Response {
    let request_id = extract_or_generate_request_id(&headers).to_string();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            record_route_failed("validation_error");
            return ProblemDetails::bad_request(rejection.body_text(), request_id).into_response();
        }
    };

    plan(state, RouteRequest::from_query(source, destination, query), request_id).await
}

/// Handle POST /api/v1/route.
async fn route_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<RouteRequest>, JsonRejection>,
) -> Response {
    let request_id = extract_or_generate_request_id(&headers).to_string();

    let request = match request {
        Ok(Json(request)) => request,
        Err(rejection) => {
            record_route_failed("validation_error");
            return ProblemDetails::bad_request(rejection.body_text(), request_id).into_response();
        }
    };

    plan(state, request, request_id).await
}

async fn plan(state: AppState, request: RouteRequest, request_id: String) -> Response {
    info!(
        request_id = %request_id,
        source = %request.source,
        destination = %request.destination,
        allowed_hops = request.allowed_hops,
        with_ground_hops = request.with_ground_hops,
        "handling route request"
    );

    if let Err(problem) = request.validate(&request_id) {
        record_route_failed("validation_error");
        return problem.into_response();
    }

    let strategy = match request.search_strategy() {
        Ok(strategy) => strategy,
        Err(e) => {
            record_route_failed("validation_error");
            return from_lib_error(&e, &request_id).into_response();
        }
    };
    let lib_request = request.to_lib_request(strategy);

    // The search is CPU-bound; keep it off the async workers.
    let network = state.network_arc();
    let outcome = tokio::task::spawn_blocking(move || {
        let plan = plan_route(&network, &lib_request)?;
        RouteSummary::from_plan(network.catalog(), &plan)
    })
    .await;

    let summary = match outcome {
        Ok(Ok(summary)) => summary,
        Ok(Err(e)) => {
            warn!(request_id = %request_id, error = %e, "route planning failed");
            record_route_failed(failure_reason(&e));
            return from_lib_error(&e, &request_id).into_response();
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "route search task failed");
            record_route_failed("internal");
            return ProblemDetails::internal_error("route search did not complete", request_id)
                .into_response();
        }
    };

    let strategy_name = summary.strategy.name();
    record_route_calculated(strategy_name, summary.ground_hops);
    record_route_legs(summary.legs, strategy_name);
    record_search_explored(summary.explored, strategy_name);

    info!(
        request_id = %request_id,
        legs = summary.legs,
        distance_km = summary.distance,
        explored = summary.explored,
        "route computed successfully"
    );

    ServiceResponse::new(RouteResponse::from(summary)).into_response()
}

fn failure_reason(error: &LibError) -> &'static str {
    match error {
        LibError::NotConnected { .. } => "not_connected",
        LibError::UnknownAirport { .. } => "unknown_airport",
        LibError::UnknownStrategy { .. } => "validation_error",
        _ => "internal",
    }
}

/// Handle GET /airports/{code}.
async fn airport_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(code): Path<String>,
) -> Response {
    let request_id = extract_or_generate_request_id(&headers).to_string();

    let request = AirportRequest { code };
    if let Err(problem) = request.validate(&request_id) {
        return problem.into_response();
    }

    let network = state.network();
    let airport = match network.catalog().resolve(request.code.trim()) {
        Ok(airport) => airport,
        Err(e) => {
            record_airports_queried("not_found");
            return from_lib_error(&e, &request_id).into_response();
        }
    };
    record_airports_queried("found");

    ServiceResponse::new(airport_response(&state, airport)).into_response()
}

fn airport_response(state: &AppState, airport: &Airport) -> AirportResponse {
    let network = state.network();
    let catalog = network.catalog();

    AirportResponse {
        id: airport.id,
        code: airport.display_code(),
        iata: airport.iata.clone(),
        icao: airport.icao.clone(),
        name: airport.name.clone(),
        city: airport.city.clone(),
        country: airport.country.clone(),
        latitude: airport.location.latitude,
        longitude: airport.location.longitude,
        departures: network.flights().neighbours(airport.id).len(),
        ground_connections: network
            .ground_connections()
            .neighbours(airport.id)
            .iter()
            .map(|link| catalog.display_code(link.airport))
            .collect(),
    }
}
