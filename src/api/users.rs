//! User profile endpoints.

use axum::{extract::State, Extension};

use super::{success, ApiResult};
use crate::auth::AuthUser;
use crate::models::{UserProfile, UserStats};
use crate::AppState;

/// GET /api/v1/users/profile - The caller's profile.
pub async fn profile(Extension(AuthUser(user)): Extension<AuthUser>) -> ApiResult<UserProfile> {
    success(
        "User profile retrieved successfully",
        UserProfile::from(&user),
    )
}

/// GET /api/v1/users/stats - Task counters for the caller.
pub async fn stats(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> ApiResult<UserStats> {
    let stats = state.repo.user_stats(&user.id).await?;
    success(
        format!("{}'s statistics retrieved successfully", user.nama),
        stats,
    )
}
