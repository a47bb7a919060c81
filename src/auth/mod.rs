//! Cookie-carried session authentication.
//!
//! Login issues a signed token in an httpOnly cookie; protected routes pass through
//! [`require_auth`], which verifies the token and attaches the resolved user.

mod cookies;
mod jwt;
mod password;

pub use cookies::{clear_session_cookie, session_cookie, SESSION_COOKIE};
pub use jwt::{issue_token, verify_token};
pub use password::{hash_password, verify_password_or_dummy};

#[cfg(test)]
pub(crate) use jwt::issue_token_at;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::errors::AppError;
use crate::models::User;
use crate::AppState;

/// The authenticated user, stored in request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Message for every rejected credential; reasons are not distinguished.
const UNAUTHORIZED: &str = "Unauthorized";

/// Resolve the configured signing secret, or fail as a server error.
pub fn signing_secret(state: &AppState) -> Result<&[u8], AppError> {
    match state.config.jwt_secret.as_deref() {
        Some(secret) => Ok(secret.as_bytes()),
        None => {
            tracing::error!("JWT_SECRET_KEY is not configured");
            Err(AppError::Internal("JWT secret key is missing".to_string()))
        }
    }
}

/// Axum middleware: reads the session cookie, verifies the token, loads the
/// user and injects [`AuthUser`] into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let secret = signing_secret(&state)?;

    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized(UNAUTHORIZED.to_string()))?;

    let claims = verify_token(&token, secret)
        .ok_or_else(|| AppError::Unauthorized(UNAUTHORIZED.to_string()))?;

    let user = state.repo.get_user(&claims.sub).await?.ok_or_else(|| {
        tracing::warn!(user_id = %claims.sub, "token for unknown user");
        AppError::Unauthorized(UNAUTHORIZED.to_string())
    })?;

    request.extensions_mut().insert(AuthUser(user));

    Ok(next.run(request).await)
}
