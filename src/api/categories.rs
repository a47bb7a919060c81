//! Category API endpoints.

use axum::{
    extract::{Path, State},
    Extension,
};
use serde::Serialize;

use super::{success, tasks::render, ApiResponse, ApiResult, JsonBody};
use crate::auth::AuthUser;
use crate::db::TaskQuery;
use crate::models::{CategoryResponse, CreateCategoryRequest, TaskResponse};
use crate::AppState;

/// Summary returned after deleting or unlinking a category.
#[derive(Debug, Serialize)]
pub struct CategoryDeletionResponse {
    pub tasks_updated: u64,
}

/// GET /api/v1/task/categories - Categories visible to the caller.
pub async fn list_categories(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> ApiResult<Vec<CategoryResponse>> {
    let categories = state.repo.list_visible_categories(&user.id).await?;
    success(
        "Categories retrieved successfully",
        categories.iter().map(CategoryResponse::from).collect(),
    )
}

/// POST /api/v1/task/categories - Create a private category.
pub async fn create_category(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    JsonBody(request): JsonBody<CreateCategoryRequest>,
) -> ApiResult<CategoryResponse> {
    let name = request.validated_name()?;
    let category = state.repo.create_category(&name, &user.id).await?;
    Ok(ApiResponse::new(
        "Category created successfully",
        CategoryResponse::from(&category),
    )
    .created())
}

/// GET /api/v1/task/categories/:name - The caller's tasks in the best-matching category.
pub async fn tasks_by_category(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(name): Path<String>,
) -> ApiResult<Vec<TaskResponse>> {
    let category = state.repo.resolve_by_name_fuzzy(&name, &user.id).await?;
    let tasks = state
        .repo
        .list_tasks(&user.id, &TaskQuery::in_category(category.id))
        .await?;
    success("Tasks retrieved successfully", render(&tasks))
}

/// DELETE /api/v1/task/categories/:id - Delete a private category or unlink a global one.
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<CategoryDeletionResponse> {
    let outcome = state.repo.delete_category(&id, &user.id).await?;
    success(
        outcome.message(),
        CategoryDeletionResponse {
            tasks_updated: outcome.tasks_updated(),
        },
    )
}
