//! Cookie-based session authentication.
//!
//! - `token`: signs and verifies session credentials
//! - `session`: carries the credential in an HTTP cookie
//! - `guard`: rejects requests without a valid session, and callers asking
//!   for someone else's data

pub mod guard;
pub mod session;
pub mod token;

pub use guard::{authenticate, require_session, AuthUser};
pub use session::{CookiePolicy, SESSION_COOKIE};
pub use token::{Claims, TokenError, TokenService, TOKEN_TTL_SECS};
