//! Axum HTTP API server for the job portal.
//!
//! This crate provides:
//! - Job posting and job application endpoints
//! - Cookie-based session tokens and the access guard
//! - Security headers, request ids and request logging
//! - Prometheus metrics

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, AuthConfig};
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
