//! Access guard.
//!
//! Authentication: a request must carry a session cookie whose token
//! verifies; the decoded identity is attached to the request as `AuthUser`.
//! Authorization: `AuthUser::ensure_identity` rejects a caller asking for
//! data keyed by another identity.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use tracing::{debug, warn};

use crate::auth::session::session_token;
use crate::auth::token::{Claims, TokenService};
use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Identity claim
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
        }
    }
}

impl AuthUser {
    /// Require that the caller is the identity named in the request.
    pub fn ensure_identity(&self, requested: Option<&str>) -> ApiResult<()> {
        if requested == Some(self.email.as_str()) {
            return Ok(());
        }
        warn!(
            email = %self.email,
            requested = ?requested,
            "Identity mismatch, access denied"
        );
        metrics::record_auth_failure("identity_mismatch");
        Err(ApiError::forbidden())
    }
}

/// Verify the session cookie in `jar`.
pub fn authenticate(tokens: &TokenService, jar: &CookieJar) -> ApiResult<AuthUser> {
    let Some(token) = session_token(jar) else {
        warn!("Session token missing, authentication denied");
        metrics::record_auth_failure("missing_token");
        return Err(ApiError::unauthorized());
    };

    match tokens.verify(&token) {
        Ok(claims) => Ok(AuthUser::from(claims)),
        Err(e) => {
            warn!(error = %e, "Session token rejected");
            metrics::record_auth_failure("invalid_token");
            Err(ApiError::unauthorized())
        }
    }
}

/// Middleware for routes that need a session.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let user = authenticate(&state.tokens, &jar)?;
    debug!(email = %user.email, "Session authenticated");
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user.
///
/// Uses the identity attached by `require_session` when present and
/// authenticates the request itself otherwise.
#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let user = authenticate(&state.tokens, &jar)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::COOKIE;
    use axum::http::{HeaderMap, StatusCode};

    use super::*;

    fn jar_with(cookie: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie.parse().unwrap());
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn test_authenticate_requires_cookie() {
        let tokens = TokenService::new(b"guard-secret");
        let err = authenticate(&tokens, &CookieJar::new()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authenticate_rejects_bad_token() {
        let tokens = TokenService::new(b"guard-secret");
        let err = authenticate(&tokens, &jar_with("token=garbage")).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authenticate_decodes_identity() {
        let tokens = TokenService::new(b"guard-secret");
        let token = tokens.issue("a@x.com").unwrap();
        let user = authenticate(&tokens, &jar_with(&format!("token={}", token))).unwrap();
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn test_ensure_identity() {
        let user = AuthUser {
            email: "a@x.com".into(),
        };
        assert!(user.ensure_identity(Some("a@x.com")).is_ok());
        assert_eq!(
            user.ensure_identity(Some("b@x.com")).unwrap_err().status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            user.ensure_identity(None).unwrap_err().status_code(),
            StatusCode::FORBIDDEN
        );
    }
}
