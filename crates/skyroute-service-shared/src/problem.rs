//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use skyroute_lib::Error as LibError;

/// Problem type URI for airport codes that resolve to nothing.
pub const PROBLEM_UNKNOWN_AIRPORT: &str = "/problems/unknown-airport";

/// Problem type URI for airports not connected within the hop ceiling.
pub const PROBLEM_NOT_CONNECTED: &str = "/problems/not-connected";

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for a dataset that is not available.
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

/// RFC 9457 Problem Details response structure.
///
/// Route problems carry the `source`, `destination` and `allowed_hops`
/// extension members so clients can tell which query failed.
///
/// # Example
///
/// ```
/// use skyroute_service_shared::{ProblemDetails, PROBLEM_UNKNOWN_AIRPORT};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_UNKNOWN_AIRPORT,
///     "Unknown Airport",
///     StatusCode::NOT_FOUND,
/// )
/// .with_detail("No such airport TLX. Did you mean: TLL?")
/// .with_request_id("req-12345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (e.g., request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_hops: Option<usize>,

    /// Similar airport codes, for unknown-airport problems.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,

    /// Content type for this response (always "application/problem+json").
    pub content_type: String,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            source: None,
            destination: None,
            allowed_hops: None,
            suggestions: Vec::new(),
            content_type: "application/problem+json".to_string(),
        }
    }

    /// Add a detailed explanation of this specific problem occurrence.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add the request identifier for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// Attach the route query this problem refers to.
    pub fn with_route(
        mut self,
        source: impl Into<String>,
        destination: impl Into<String>,
        allowed_hops: usize,
    ) -> Self {
        self.source = Some(source.into());
        self.destination = Some(destination.into());
        self.allowed_hops = Some(allowed_hops);
        self
    }

    /// Create a 400 Bad Request problem for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INVALID_REQUEST,
            "Invalid Request",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 404 Not Found problem for an unknown airport code.
    pub fn unknown_airport(
        code: &str,
        suggestions: &[String],
        request_id: impl Into<String>,
    ) -> Self {
        let detail = if suggestions.is_empty() {
            format!("No such airport {code}")
        } else {
            format!(
                "No such airport {code}. Did you mean: {}?",
                suggestions.join(", ")
            )
        };

        let mut problem = Self::new(
            PROBLEM_UNKNOWN_AIRPORT,
            "Unknown Airport",
            StatusCode::NOT_FOUND,
        )
        .with_detail(detail)
        .with_request_id(request_id);
        problem.suggestions = suggestions.to_vec();
        problem
    }

    /// Create a 404 Not Found problem for airports not connected within the ceiling.
    pub fn not_connected(
        source: &str,
        destination: &str,
        allowed_hops: usize,
        request_id: impl Into<String>,
    ) -> Self {
        Self::new(
            PROBLEM_NOT_CONNECTED,
            "Not Connected",
            StatusCode::NOT_FOUND,
        )
        .with_detail("not connected in allowed hops count")
        .with_route(source, destination, allowed_hops)
        .with_request_id(request_id)
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 503 Service Unavailable problem.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// The `request_id` must be provided separately since library errors don't have it.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::UnknownAirport { code, suggestions } => {
            ProblemDetails::unknown_airport(code, suggestions, request_id)
        }
        LibError::NotConnected {
            origin,
            destination,
            hop_ceiling,
        } => ProblemDetails::not_connected(origin, destination, *hop_ceiling, request_id),
        LibError::UnknownStrategy { .. } => {
            ProblemDetails::bad_request(error.to_string(), request_id)
        }
        LibError::DatasetNotFound { path } => ProblemDetails::service_unavailable(
            format!("Dataset not available at {}", path.display()),
            request_id,
        ),
        _ => ProblemDetails::internal_error(error.to_string(), request_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_details_new() {
        let problem = ProblemDetails::new(
            PROBLEM_UNKNOWN_AIRPORT,
            "Unknown Airport",
            StatusCode::NOT_FOUND,
        );
        assert_eq!(problem.type_uri, PROBLEM_UNKNOWN_AIRPORT);
        assert_eq!(problem.status, 404);
        assert_eq!(problem.content_type, "application/problem+json");
        assert!(problem.allowed_hops.is_none());
    }

    #[test]
    fn test_problem_details_bad_request() {
        let problem = ProblemDetails::bad_request("allowed_hops must be at least 1", "req-123");
        assert_eq!(problem.status, 400);
        assert_eq!(problem.instance.as_deref(), Some("req-123"));
    }

    #[test]
    fn test_unknown_airport_with_suggestions() {
        let suggestions = vec!["TLL".to_string(), "TAY".to_string()];
        let problem = ProblemDetails::unknown_airport("TLX", &suggestions, "req-456");

        assert_eq!(problem.status, 404);
        let detail = problem.detail.as_deref().unwrap_or_default();
        assert!(detail.contains("No such airport TLX"));
        assert!(detail.contains("TLL, TAY"));
        assert_eq!(problem.suggestions, suggestions);
    }

    #[test]
    fn test_unknown_airport_without_suggestions() {
        let problem = ProblemDetails::unknown_airport("XYZ", &[], "req-789");
        let detail = problem.detail.as_deref().unwrap_or_default();
        assert!(!detail.contains("Did you mean"));
    }

    #[test]
    fn test_not_connected_serialises_route_members() {
        let problem = ProblemDetails::not_connected("HAV", "TAY", 2, "req-route");
        let json = serde_json::to_value(&problem).expect("serialises");

        assert_eq!(json["type"], PROBLEM_NOT_CONNECTED);
        assert_eq!(json["status"], 404);
        assert_eq!(json["source"], "HAV");
        assert_eq!(json["destination"], "TAY");
        assert_eq!(json["allowed_hops"], 2);
        assert_eq!(json["detail"], "not connected in allowed hops count");
        assert!(json.get("suggestions").is_none());
    }

    #[test]
    fn test_from_lib_error_unknown_airport() {
        let error = LibError::UnknownAirport {
            code: "TLX".to_string(),
            suggestions: vec!["TLL".to_string()],
        };
        let problem = from_lib_error(&error, "req-lib");

        assert_eq!(problem.type_uri, PROBLEM_UNKNOWN_AIRPORT);
        assert_eq!(problem.status, 404);
    }

    #[test]
    fn test_from_lib_error_not_connected() {
        let error = LibError::NotConnected {
            origin: "HAV".to_string(),
            destination: "TAY".to_string(),
            hop_ceiling: 2,
        };
        let problem = from_lib_error(&error, "req-route");

        assert_eq!(problem.type_uri, PROBLEM_NOT_CONNECTED);
        assert_eq!(problem.allowed_hops, Some(2));
    }

    #[test]
    fn test_from_lib_error_unknown_strategy_is_bad_request() {
        let error = LibError::UnknownStrategy {
            name: "greedy".to_string(),
        };
        assert_eq!(from_lib_error(&error, "req").status, 400);
    }
}
