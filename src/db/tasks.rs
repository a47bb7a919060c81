//! Task lifecycle: creation, full-replace updates, completion toggles,
//! soft delete / restore, and owner-scoped queries.

use chrono::{NaiveDateTime, Utc};
use sqlx::{QueryBuilder, Sqlite};

use super::repository::{contains_pattern, task_from_row, Repository};
use crate::errors::AppError;
use crate::models::{Owned, Task, TaskDraft};

const TASK_SELECT: &str = "SELECT t.id, t.title, t.description, t.is_completed, t.user_id, \
     t.due_date, t.category_id, c.name AS category_name, t.priority, t.created_at, t.deleted_at \
     FROM tasks t \
     LEFT JOIN task_categories c ON c.id = t.category_id AND c.deleted_at IS NULL";

/// Filters for listing a user's live (not soft-deleted) tasks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskQuery {
    pub completed: Option<bool>,
    pub due_before: Option<NaiveDateTime>,
    pub category_id: Option<String>,
    /// Substring matched against title or description
    pub text: Option<String>,
}

impl TaskQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn completed() -> Self {
        Self {
            completed: Some(true),
            ..Self::default()
        }
    }

    pub fn pending() -> Self {
        Self {
            completed: Some(false),
            ..Self::default()
        }
    }

    /// Incomplete tasks whose due date is earlier than `now`.
    pub fn overdue(now: NaiveDateTime) -> Self {
        Self {
            completed: Some(false),
            due_before: Some(now),
            ..Self::default()
        }
    }

    pub fn in_category(category_id: impl Into<String>) -> Self {
        Self {
            category_id: Some(category_id.into()),
            ..Self::default()
        }
    }

    pub fn search(text: Option<String>, category_id: Option<String>) -> Self {
        Self {
            text: text.filter(|t| !t.is_empty()),
            category_id,
            ..Self::default()
        }
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Task not found".to_string())
}

impl Repository {
    /// Fetch a task by ID, optionally including soft-deleted rows.
    async fn fetch_task(&self, id: &str, include_deleted: bool) -> Result<Option<Task>, AppError> {
        let sql = if include_deleted {
            format!("{TASK_SELECT} WHERE t.id = ?")
        } else {
            format!("{TASK_SELECT} WHERE t.id = ? AND t.deleted_at IS NULL")
        };
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(task_from_row))
    }

    /// Get a live task owned by `user_id`.
    ///
    /// Tasks of other users are reported as not found.
    pub async fn get_task(&self, id: &str, user_id: &str) -> Result<Task, AppError> {
        self.fetch_task(id, false)
            .await?
            .filter(|task| task.owned_by(user_id))
            .ok_or_else(not_found)
    }

    /// Create a task for `user_id`. A named category must be visible to the user.
    pub async fn create_task(&self, user_id: &str, draft: &TaskDraft) -> Result<Task, AppError> {
        let category_id = match &draft.category {
            Some(name) => Some(self.resolve_by_name(name, user_id).await?.id),
            None => None,
        };

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().naive_utc();

        sqlx::query(
            "INSERT INTO tasks (id, title, description, is_completed, user_id, due_date, category_id, priority, created_at, updated_at) VALUES (?, ?, ?, 0, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(user_id)
        .bind(draft.due_date)
        .bind(&category_id)
        .bind(draft.priority.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get_task(&id, user_id).await
    }

    /// Replace a task's fields.
    ///
    /// Title, description, priority and completion always take the draft's values.
    /// Due date and category keep their current values when the draft omits them.
    pub async fn update_task(
        &self,
        id: &str,
        user_id: &str,
        draft: &TaskDraft,
    ) -> Result<Task, AppError> {
        let existing = self.get_task(id, user_id).await?;

        let due_date = draft.due_date.or(existing.due_date);
        let category_id = match &draft.category {
            Some(name) => Some(self.resolve_by_name(name, user_id).await?.id),
            None => existing.category_id,
        };

        let result = sqlx::query(
            "UPDATE tasks SET title = ?, description = ?, is_completed = ?, due_date = ?, category_id = ?, priority = ?, updated_at = ? WHERE id = ? AND user_id = ? AND deleted_at IS NULL",
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.is_completed as i32)
        .bind(due_date)
        .bind(&category_id)
        .bind(draft.priority.as_str())
        .bind(Utc::now().naive_utc())
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }

        self.get_task(id, user_id).await
    }

    /// Mark a live task as completed.
    pub async fn complete_task(&self, id: &str, user_id: &str) -> Result<Task, AppError> {
        let task = self.get_task(id, user_id).await?;

        sqlx::query("UPDATE tasks SET is_completed = 1, updated_at = ? WHERE id = ?")
            .bind(Utc::now().naive_utc())
            .bind(&task.id)
            .execute(&self.pool)
            .await?;

        self.get_task(id, user_id).await
    }

    /// Mark a task as not completed. Also restores it from the trash.
    pub async fn uncomplete_task(&self, id: &str, user_id: &str) -> Result<Task, AppError> {
        let task = self
            .fetch_task(id, true)
            .await?
            .filter(|task| task.owned_by(user_id))
            .ok_or_else(not_found)?;

        sqlx::query(
            "UPDATE tasks SET is_completed = 0, deleted_at = NULL, updated_at = ? WHERE id = ?",
        )
        .bind(Utc::now().naive_utc())
        .bind(&task.id)
        .execute(&self.pool)
        .await?;

        if task.deleted_at.is_some() {
            tracing::debug!(task_id = %task.id, "restored task from trash");
        }

        self.get_task(id, user_id).await
    }

    /// Soft-delete a live task.
    pub async fn delete_task(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE tasks SET deleted_at = ? WHERE id = ? AND user_id = ? AND deleted_at IS NULL",
        )
        .bind(Utc::now().naive_utc())
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }

    /// List the user's live tasks matching `query`, oldest first.
    pub async fn list_tasks(&self, user_id: &str, query: &TaskQuery) -> Result<Vec<Task>, AppError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(TASK_SELECT);
        builder.push(" WHERE t.deleted_at IS NULL AND t.user_id = ");
        builder.push_bind(user_id);

        if let Some(completed) = query.completed {
            builder.push(" AND t.is_completed = ");
            builder.push_bind(completed as i32);
        }
        if let Some(due_before) = query.due_before {
            builder.push(" AND t.due_date IS NOT NULL AND t.due_date < ");
            builder.push_bind(due_before);
        }
        if let Some(category_id) = &query.category_id {
            builder.push(" AND t.category_id = ");
            builder.push_bind(category_id.as_str());
        }
        if let Some(text) = &query.text {
            let pattern = contains_pattern(text);
            builder.push(" AND (t.title LIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" ESCAPE '\\' OR t.description LIKE ");
            builder.push_bind(pattern);
            builder.push(" ESCAPE '\\')");
        }
        builder.push(" ORDER BY t.created_at ASC, t.id ASC");

        let rows = builder.build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(task_from_row).collect())
    }
}
