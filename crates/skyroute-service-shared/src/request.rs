//! Request types and validation for HTTP endpoints.

use std::fmt;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use skyroute_lib::{SearchStrategy, DEFAULT_HOP_CEILING};

use crate::ProblemDetails;

/// Largest hop ceiling the service accepts.
///
/// The bounded search is exponential in the ceiling for the exhaustive
/// strategy, so the service refuses anything above this.
pub const MAX_HOP_CEILING: usize = 8;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Query string of `GET /routes/{source}/{destination}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteQuery {
    #[serde(default)]
    pub allowed_hops: Option<usize>,

    /// A bare `?with-ground-hops` with no value counts as `true`.
    #[serde(default, alias = "with-ground-hops", deserialize_with = "deserialize_flag")]
    pub with_ground_hops: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

/// Deserialize a boolean query flag where a present but empty value means `true`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl Visitor<'_> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("`true`, `false` or an empty flag")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<bool, E> {
            match value.trim() {
                "" | "true" => Ok(true),
                "false" => Ok(false),
                other => Err(E::invalid_value(Unexpected::Str(other), &self)),
            }
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

/// Request for the cheapest route between two airports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    /// IATA or ICAO code of the departure airport.
    pub source: String,

    /// IATA or ICAO code of the arrival airport.
    pub destination: String,

    /// Maximum number of legs (default 4).
    #[serde(default = "default_allowed_hops")]
    pub allowed_hops: usize,

    /// Allow the final stretch of a leg to be covered by ground transport.
    #[serde(default, alias = "with-ground-hops")]
    pub with_ground_hops: bool,

    /// Search strategy name; `oracle-pruned` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

fn default_allowed_hops() -> usize {
    DEFAULT_HOP_CEILING
}

impl RouteRequest {
    /// Combine path segments with the query string of a GET request.
    pub fn from_query(
        source: impl Into<String>,
        destination: impl Into<String>,
        query: RouteQuery,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            allowed_hops: query.allowed_hops.unwrap_or(DEFAULT_HOP_CEILING),
            with_ground_hops: query.with_ground_hops,
            strategy: query.strategy,
        }
    }

    /// Parsed search strategy.
    pub fn search_strategy(&self) -> skyroute_lib::Result<SearchStrategy> {
        match self.strategy.as_deref() {
            Some(name) => name.parse(),
            None => Ok(SearchStrategy::default()),
        }
    }

    /// Library request for a validated HTTP request.
    pub fn to_lib_request(&self, strategy: SearchStrategy) -> skyroute_lib::RouteRequest {
        skyroute_lib::RouteRequest::new(self.source.trim(), self.destination.trim())
            .with_hop_ceiling(self.allowed_hops)
            .with_ground_hops(self.with_ground_hops)
            .with_strategy(strategy)
    }
}

impl Validate for RouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.source.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'source' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.destination.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'destination' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.allowed_hops == 0 || self.allowed_hops > MAX_HOP_CEILING {
            return Err(Box::new(ProblemDetails::bad_request(
                format!(
                    "The 'allowed_hops' field must be between 1 and {MAX_HOP_CEILING}; \
                     zero is rejected rather than replaced by the default of {DEFAULT_HOP_CEILING}"
                ),
                request_id,
            )));
        }

        if let Err(err) = self.search_strategy() {
            return Err(Box::new(ProblemDetails::bad_request(
                format!(
                    "{err}; expected one of: {}",
                    SearchStrategy::ALL.map(SearchStrategy::name).join(", ")
                ),
                request_id,
            )));
        }

        Ok(())
    }
}

/// Request for a single airport by code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportRequest {
    /// IATA or ICAO code.
    pub code: String,
}

impl Validate for AirportRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        let code = self.code.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Box::new(ProblemDetails::bad_request(
                "The airport code must be a non-empty alphanumeric IATA or ICAO code",
                request_id,
            )));
        }
        Ok(())
    }
}
