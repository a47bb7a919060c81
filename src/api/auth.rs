//! Authentication endpoints.

use axum::{extract::State, Extension};
use axum_extra::extract::cookie::CookieJar;

use super::{ApiResponse, ApiResult, JsonBody};
use crate::auth::{
    clear_session_cookie, hash_password, issue_token, session_cookie, signing_secret,
    verify_password_or_dummy, AuthUser,
};
use crate::errors::AppError;
use crate::models::{LoginRequest, RegisterRequest};
use crate::AppState;

/// POST /api/v1/auth/register - Create an account.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> ApiResult<()> {
    request.validate()?;

    if state.repo.find_user_by_email(&request.email).await?.is_some() {
        return Err(AppError::Validation(
            "User already exists with this email".to_string(),
        ));
    }

    let hash = hash_password(&request.password)?;
    let user = state
        .repo
        .create_user(request.nama.trim(), &request.email, &hash)
        .await?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok(ApiResponse::without_data("User registered successfully"))
}

/// POST /api/v1/auth/login - Verify credentials and open the single session.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<(CookieJar, ApiResponse<()>), AppError> {
    request.validate()?;

    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let user = state.repo.find_user_by_email(&request.email).await?;
    let matches = verify_password_or_dummy(
        &request.password,
        user.as_ref().map(|u| u.password_hash.as_str()),
    );
    let user = match user {
        Some(user) if matches => user,
        _ => return Err(invalid()),
    };

    let secret = signing_secret(&state)?;

    if !state.repo.try_begin_session(&user.id).await? {
        tracing::debug!(user_id = %user.id, "login rejected: session already active");
        return Err(AppError::Unauthorized(
            "User is already logged in".to_string(),
        ));
    }

    let token = match issue_token(&user.id, &user.email, secret) {
        Ok(token) => token,
        Err(e) => {
            state.repo.end_session(&user.id).await?;
            return Err(e);
        }
    };

    tracing::info!(user_id = %user.id, "user logged in");
    Ok((
        jar.add(session_cookie(&token, state.config.cookie_secure)),
        ApiResponse::without_data("Login successful"),
    ))
}

/// POST /api/v1/auth/logout - Close the session and expire the cookie.
pub async fn logout(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiResponse<()>), AppError> {
    state.repo.end_session(&user.id).await?;

    tracing::info!(user_id = %user.id, "user logged out");
    Ok((
        jar.add(clear_session_cookie(state.config.cookie_secure)),
        ApiResponse::without_data("User logged out successfully"),
    ))
}
