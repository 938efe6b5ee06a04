//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Method, Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "jobboard_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "jobboard_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "jobboard_http_requests_in_flight";

    // Auth metrics
    pub const AUTH_FAILURES_TOTAL: &str = "jobboard_auth_failures_total";
    pub const SESSIONS_ISSUED_TOTAL: &str = "jobboard_sessions_issued_total";

    // Domain metrics
    pub const APPLICATIONS_SUBMITTED_TOTAL: &str = "jobboard_applications_submitted_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a rejected request at the access guard.
pub fn record_auth_failure(reason: &str) {
    let labels = [("reason", reason.to_string())];
    counter!(names::AUTH_FAILURES_TOTAL, &labels).increment(1);
}

/// Record a session token issued.
pub fn record_session_issued() {
    counter!(names::SESSIONS_ISSUED_TOTAL).increment(1);
}

/// Record an application submitted.
pub fn record_application_submitted() {
    counter!(names::APPLICATIONS_SUBMITTED_TOTAL).increment(1);
}

/// `path` label for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// `path` label: the route template (`/jobs/:id`), never the raw path, so
/// label cardinality stays bounded by the router.
fn route_label(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// `method` label; anything outside the standard verbs is folded into one value.
fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::PATCH => "PATCH",
        Method::DELETE => "DELETE",
        Method::HEAD => "HEAD",
        Method::OPTIONS => "OPTIONS",
        _ => "OTHER",
    }
}

/// Metrics middleware for HTTP requests.
///
/// Must be installed with `Router::layer` so the matched route is known.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = method_label(request.method());
    let route = route_label(&request);
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(method, &route, status, duration);

    response
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use axum::routing::get;
    use axum::{middleware, Router};
    use tower::ServiceExt;

    use super::*;

    async fn echo_route_label(request: Request<Body>, next: Next) -> Response<Body> {
        let label = route_label(&request);
        let mut response = next.run(request).await;
        response
            .headers_mut()
            .insert("x-route", HeaderValue::from_str(&label).unwrap());
        response
    }

    async fn label_for(uri: &str) -> String {
        let app = Router::new()
            .route("/jobs/:id", get(|| async { "job" }))
            .route("/job-applications/jobs/:job_id", get(|| async { "list" }))
            .layer(middleware::from_fn(echo_route_label));

        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.headers()["x-route"].to_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_route_label_uses_template() {
        assert_eq!(label_for("/jobs/65f1a2b3c4d5e6f708192a3b").await, "/jobs/:id");
        assert_eq!(
            label_for("/job-applications/jobs/anything-at-all").await,
            "/job-applications/jobs/:job_id"
        );
    }

    #[tokio::test]
    async fn test_unmatched_paths_share_one_label() {
        assert_eq!(label_for("/no/such/route/1").await, UNMATCHED_ROUTE);
        assert_eq!(label_for("/no/such/route/2").await, UNMATCHED_ROUTE);
    }

    #[test]
    fn test_method_label_folds_unknown_verbs() {
        assert_eq!(method_label(&Method::PATCH), "PATCH");
        let custom = Method::from_bytes(b"PURGE").unwrap();
        assert_eq!(method_label(&custom), "OTHER");
    }
}
