//! Cookie names and builders.
//!
//! All three cookies are HTTP-only and scoped to the site root. The
//! pending-state cookie carries the in-progress authorization request as
//! a query string; the other two carry signed JWTs.

use cookie::{Cookie, SameSite};
use time::Duration;

/// Pending authorization state, serialized as a query string.
pub const PENDING_COOKIE: &str = "so-current";

/// The interactive login session JWT.
pub const SESSION_COOKIE: &str = "so-jwt";

/// The refresh JWT paired with the session token.
pub const REFRESH_COOKIE: &str = "so-ts";

fn base(name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

/// Builds the pending-state cookie.
#[must_use]
pub fn pending_cookie(value: String, ttl: Duration) -> Cookie<'static> {
    base(PENDING_COOKIE, value, ttl)
}

/// Builds the session JWT cookie.
#[must_use]
pub fn session_cookie(jwt: String, ttl: Duration) -> Cookie<'static> {
    base(SESSION_COOKIE, jwt, ttl)
}

/// Builds the refresh JWT cookie.
#[must_use]
pub fn refresh_cookie(jwt: String, ttl: Duration) -> Cookie<'static> {
    base(REFRESH_COOKIE, jwt, ttl)
}

/// Builds a cookie that clears `name` when added to a jar.
///
/// The path must match the one the cookie was set with or browsers keep
/// the original.
#[must_use]
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}
