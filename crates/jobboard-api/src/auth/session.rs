//! Session cookie handling.
//!
//! The cookie is the whole session; there is no server-side store. Setting
//! and clearing use one `CookiePolicy`, since browsers only drop a cookie
//! when the clearing `Set-Cookie` carries the same attributes.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::ApiConfig;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Transport flags applied to the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookiePolicy {
    /// Production sends the cookie cross-site over TLS only; development
    /// keeps it same-site so it works without TLS.
    pub fn for_environment(production: bool) -> Self {
        if production {
            Self {
                secure: true,
                same_site: SameSite::None,
            }
        } else {
            Self {
                secure: false,
                same_site: SameSite::Strict,
            }
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::for_environment(config.is_production())
    }

    fn cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .build()
    }

    /// Cookie carrying a freshly issued token.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        self.cookie(token)
    }

    /// Cookie that clears the session.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.cookie(String::new());
        cookie.make_removal();
        cookie
    }

    /// Attach the session cookie to the response jar.
    pub fn start(&self, jar: CookieJar, token: String) -> CookieJar {
        jar.add(self.session_cookie(token))
    }

    /// Always emits the clearing cookie, whether or not the request had one.
    pub fn end(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.removal_cookie())
    }
}

/// The session token carried by the request, if any.
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::header::COOKIE;
    use axum::http::HeaderMap;

    use super::*;

    #[test]
    fn test_development_flags() {
        let rendered = CookiePolicy::for_environment(false)
            .session_cookie("abc".into())
            .to_string();
        assert!(rendered.starts_with("token=abc"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Strict"));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn test_production_flags() {
        let rendered = CookiePolicy::for_environment(true)
            .session_cookie("abc".into())
            .to_string();
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=None"));
        assert!(rendered.contains("Secure"));
    }

    #[test]
    fn test_removal_keeps_flags() {
        for production in [false, true] {
            let policy = CookiePolicy::for_environment(production);
            let set = policy.session_cookie("abc".into());
            let clear = policy.removal_cookie();

            assert_eq!(clear.value(), "");
            assert_eq!(clear.max_age().map(|d| d.whole_seconds()), Some(0));
            assert_eq!(clear.http_only(), set.http_only());
            assert_eq!(clear.secure(), set.secure());
            assert_eq!(clear.same_site(), set.same_site());
            assert_eq!(clear.path(), set.path());
        }
    }

    #[test]
    fn test_session_token_ignores_empty_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "token=; theme=dark".parse().unwrap());
        assert_eq!(session_token(&CookieJar::from_headers(&headers)), None);

        headers.insert(COOKIE, "theme=dark; token=abc".parse().unwrap());
        assert_eq!(
            session_token(&CookieJar::from_headers(&headers)).as_deref(),
            Some("abc")
        );
    }
}
