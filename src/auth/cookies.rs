//! Session cookie construction.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use super::jwt::TOKEN_LIFETIME_SECS;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "Authorization";

/// Build the httpOnly session cookie (lives as long as the token).
pub fn session_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(TOKEN_LIFETIME_SECS))
        .build()
}

/// Build an already-expired session cookie so the client drops it.
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, String::new()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}
