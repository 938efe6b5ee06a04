//! API routes.

use axum::middleware;
use axum::routing::{get, patch, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::auth::require_session;
use crate::handlers::{
    create_job, get_job, health, home, issue_token, list_job_applications, list_jobs,
    list_my_applications, logout, ready, submit_application, update_application_status,
};
use crate::metrics::metrics_middleware;
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let session_routes = Router::new()
        .route("/jwt", post(issue_token))
        .route("/logout", post(logout));

    let job_routes = Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/:id", get(get_job));

    // Only listing one's own applications needs a session
    let application_routes = Router::new()
        .route(
            "/job-applications",
            get(list_my_applications)
                .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
                .post(submit_application),
        )
        .route("/job-applications/jobs/:job_id", get(list_job_applications))
        .route("/job-applications/:id", patch(update_application_status));

    let health_routes = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .merge(session_routes)
        .merge(job_routes)
        .merge(application_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
