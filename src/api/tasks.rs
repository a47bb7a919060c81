//! Task API endpoints.

use axum::{
    extract::{Path, Query, State},
    Extension,
};
use chrono::Utc;
use serde::Deserialize;

use super::{success, ApiResponse, ApiResult, JsonBody};
use crate::auth::AuthUser;
use crate::db::TaskQuery;
use crate::models::{CreateTaskRequest, Task, TaskResponse, UpdateTaskRequest};
use crate::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Substring matched against title or description.
    #[serde(default)]
    pub q: Option<String>,
    /// Exact name of a visible category.
    #[serde(default)]
    pub category: Option<String>,
}

pub(super) fn render(tasks: &[Task]) -> Vec<TaskResponse> {
    tasks.iter().map(TaskResponse::from).collect()
}

/// POST /api/v1/task - Create a task.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    JsonBody(request): JsonBody<CreateTaskRequest>,
) -> ApiResult<TaskResponse> {
    let draft = request.validate()?;
    let task = state.repo.create_task(&user.id, &draft).await?;
    Ok(ApiResponse::new("Task created successfully", TaskResponse::from(&task)).created())
}

/// GET /api/v1/task - List the caller's tasks.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> ApiResult<Vec<TaskResponse>> {
    let tasks = state.repo.list_tasks(&user.id, &TaskQuery::all()).await?;
    success("Tasks retrieved successfully", render(&tasks))
}

/// GET /api/v1/task/:id - Get a single task.
pub async fn get_task(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<TaskResponse> {
    let task = state.repo.get_task(&id, &user.id).await?;
    success("Task retrieved successfully", TaskResponse::from(&task))
}

/// PUT /api/v1/task/:id - Replace a task's fields.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateTaskRequest>,
) -> ApiResult<TaskResponse> {
    let draft = request.validate()?;
    let task = state.repo.update_task(&id, &user.id, &draft).await?;
    success("Task updated successfully", TaskResponse::from(&task))
}

/// DELETE /api/v1/task/:id - Move a task to the trash.
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.repo.delete_task(&id, &user.id).await?;
    Ok(ApiResponse::without_data("Task deleted successfully"))
}

/// PUT /api/v1/task/:id/complete - Mark a task as completed.
pub async fn complete_task(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<TaskResponse> {
    let task = state.repo.complete_task(&id, &user.id).await?;
    success("Task marked as completed", TaskResponse::from(&task))
}

/// PUT /api/v1/task/:id/uncomplete - Mark a task as not completed, restoring it
/// from the trash if needed.
pub async fn uncomplete_task(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<TaskResponse> {
    let task = state.repo.uncomplete_task(&id, &user.id).await?;
    success("Task marked as uncompleted", TaskResponse::from(&task))
}

/// GET /api/v1/task/completed
pub async fn completed_tasks(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> ApiResult<Vec<TaskResponse>> {
    let tasks = state
        .repo
        .list_tasks(&user.id, &TaskQuery::completed())
        .await?;
    success("Completed tasks retrieved successfully", render(&tasks))
}

/// GET /api/v1/task/pending
pub async fn pending_tasks(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> ApiResult<Vec<TaskResponse>> {
    let tasks = state.repo.list_tasks(&user.id, &TaskQuery::pending()).await?;
    success("Pending tasks retrieved successfully", render(&tasks))
}

/// GET /api/v1/task/overdue
pub async fn overdue_tasks(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> ApiResult<Vec<TaskResponse>> {
    let now = Utc::now().naive_utc();
    let tasks = state
        .repo
        .list_tasks(&user.id, &TaskQuery::overdue(now))
        .await?;
    success("Overdue tasks retrieved successfully", render(&tasks))
}

/// GET /api/v1/task/search?q=&category= - Text search, optionally within a category.
pub async fn search_tasks(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<TaskResponse>> {
    let category_id = match params.category.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => {
            Some(state.repo.resolve_by_name(name, &user.id).await?.id)
        }
        _ => None,
    };

    let text = params.q.map(|q| q.trim().to_string());
    let tasks = state
        .repo
        .list_tasks(&user.id, &TaskQuery::search(text, category_id))
        .await?;
    success("Search results retrieved successfully", render(&tasks))
}
