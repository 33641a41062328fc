//! Request correlation and HTTP metrics for SkyRoute services.
//!
//! [`MetricsLayer`] wraps every request in a `request` span carrying the
//! correlation id, then records `http_requests_total` (method, path, status
//! class) and `http_request_duration_seconds` (method, path) once the
//! response is ready. Path labels go through [`normalize_path`] so airport
//! codes never become label values.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::http::{HeaderMap, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{info_span, Span};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Fresh time-sortable UUID v7.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Take the caller's `X-Request-ID`, or generate one when it is absent,
/// empty or not valid UTF-8.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| RequestId(id.to_string()))
        .unwrap_or_else(RequestId::generate)
}

/// Metric label for a request path.
///
/// Strips the query string and replaces airport codes in the parameterised
/// routes with their template, so `/routes/TLL/SFO?allowed_hops=3` becomes
/// `/routes/{source}/{destination}`.
pub fn normalize_path(path: &str) -> String {
    let path = path.split('?').next().unwrap_or(path);
    let segments: Vec<&str> = path.trim_end_matches('/').split('/').collect();

    match segments.as_slice() {
        ["", "routes", _, _] => "/routes/{source}/{destination}".to_string(),
        ["", "airports", _] => "/airports/{code}".to_string(),
        _ => path.to_string(),
    }
}

fn status_class(status: u16) -> &'static str {
    match status / 100 {
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        5 => "5xx",
        _ => "other",
    }
}

/// Labels and start time of an in-flight request.
struct RequestTimer {
    start: Instant,
    method: String,
    path: String,
}

impl RequestTimer {
    fn finish(&self, status: Option<u16>) {
        let elapsed = self.start.elapsed().as_secs_f64();
        let class = status.map_or("5xx", status_class);

        metrics::counter!(
            "http_requests_total",
            "method" => self.method.clone(),
            "path" => self.path.clone(),
            "status" => class
        )
        .increment(1);
        metrics::histogram!(
            "http_request_duration_seconds",
            "method" => self.method.clone(),
            "path" => self.path.clone()
        )
        .record(elapsed);

        match status {
            Some(status) => tracing::info!(status, latency_ms = elapsed * 1000.0, "request completed"),
            None => tracing::error!(latency_ms = elapsed * 1000.0, "request failed"),
        }
    }
}

/// Tower layer wrapping services in [`MetricsMiddleware`].
#[derive(Debug, Clone, Copy)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsMiddleware { inner }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsMiddleware<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for MetricsMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = MetricsFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let timer = RequestTimer {
            start: Instant::now(),
            method: req.method().to_string(),
            path: normalize_path(req.uri().path()),
        };
        let request_id = extract_or_generate_request_id(req.headers());
        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %timer.method,
            path = %timer.path,
        );

        let inner = {
            let _enter = span.enter();
            tracing::debug!(uri = %req.uri(), "handling request");
            self.inner.call(req)
        };

        MetricsFuture { inner, timer, span }
    }
}

pin_project! {
    /// Response future that records metrics when it resolves.
    pub struct MetricsFuture<F> {
        #[pin]
        inner: F,
        timer: RequestTimer,
        span: Span,
    }
}

impl<F, ResBody, E> Future for MetricsFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _enter = this.span.enter();

        let result = match this.inner.poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(result) => result,
        };
        this.timer
            .finish(result.as_ref().ok().map(|response| response.status().as_u16()));

        Poll::Ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn generated_request_ids_are_unique_uuids() {
        let first = RequestId::generate();
        let second = RequestId::generate();

        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), 36);
        assert_eq!(first.to_string(), first.as_str());
    }

    #[test]
    fn request_id_comes_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Request-ID", HeaderValue::from_static(" trip-42 "));

        assert_eq!(extract_or_generate_request_id(&headers).as_str(), "trip-42");
    }

    #[test]
    fn blank_request_id_header_is_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  "));

        assert_eq!(extract_or_generate_request_id(&headers).as_str().len(), 36);
    }

    #[test]
    fn route_and_airport_paths_are_templated() {
        assert_eq!(normalize_path("/api/v1/route"), "/api/v1/route");
        assert_eq!(
            normalize_path("/routes/TLL/SFO?allowed_hops=3"),
            "/routes/{source}/{destination}"
        );
        assert_eq!(normalize_path("/airports/EETN"), "/airports/{code}");
        assert_eq!(normalize_path("/health/ready"), "/health/ready");
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn unknown_path_shapes_are_kept() {
        assert_eq!(normalize_path("/routes/TLL"), "/routes/TLL");
        assert_eq!(normalize_path("/airports/A/B"), "/airports/A/B");
    }

    #[test]
    fn status_codes_group_by_class() {
        assert_eq!(status_class(200), "2xx");
        assert_eq!(status_class(301), "3xx");
        assert_eq!(status_class(404), "4xx");
        assert_eq!(status_class(503), "5xx");
        assert_eq!(status_class(99), "other");
    }
}
