//! Response wrapper for successful HTTP responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Wrapper for successful responses with content type metadata.
///
/// The payload's fields are flattened into the top-level JSON object next to
/// `content_type`, mirroring the shape of [`crate::ProblemDetails`].
///
/// # Example
///
/// ```
/// use skyroute_service_shared::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct RouteResult {
///     hops: Vec<String>,
///     distance: f64,
/// }
///
/// let result = RouteResult { hops: vec!["TLL".into(), "HEL".into()], distance: 82.9 };
/// let response = ServiceResponse::new(result);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    #[serde(flatten)]
    pub data: T,

    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    /// Wrap a payload with the `application/json` content type.
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Leg {
        distance: f64,
    }

    #[test]
    fn test_response_fields_are_flattened() {
        #[derive(Serialize)]
        struct RouteResult {
            source: String,
            hops: Vec<String>,
        }

        let response = ServiceResponse::new(RouteResult {
            source: "TLL".to_string(),
            hops: vec!["TLL".to_string(), "HEL".to_string()],
        });
        let json = serde_json::to_value(&response).expect("serialises");

        assert_eq!(json["source"], "TLL");
        assert_eq!(json["hops"][1], "HEL");
        assert_eq!(json["content_type"], "application/json");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_response_from_payload() {
        let response: ServiceResponse<Leg> = Leg { distance: 1.5 }.into();
        assert_eq!(response.data, Leg { distance: 1.5 });
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"distance":42.0,"content_type":"application/json"}"#;
        let response: ServiceResponse<Leg> = serde_json::from_str(json).expect("parses");
        assert_eq!(response.data.distance, 42.0);
    }
}
