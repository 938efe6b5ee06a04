//! Login and logout.
//!
//! `POST /jwt` signs a token for the posted identity and sets it as the
//! session cookie; `POST /logout` clears the cookie.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Identity to issue a session for.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// POST /jwt
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<SuccessResponse>)> {
    let Json(login) = payload?;
    if login.email.trim().is_empty() {
        return Err(ApiError::bad_request("email is required"));
    }

    let token = state
        .tokens
        .issue(&login.email)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    info!(email = %login.email, "Issued session token");
    metrics::record_session_issued();

    Ok((
        state.cookies.start(jar, token),
        Json(SuccessResponse { success: true }),
    ))
}

/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    (state.cookies.end(jar), Json(SuccessResponse { success: true }))
}
