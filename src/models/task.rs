//! Task model, write payloads and the response shape.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{char_len, Owned, DATETIME_FORMAT};
use crate::errors::AppError;

/// Accepted input format for due dates (interpreted as UTC).
pub const DUE_DATE_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Task priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::None => "none",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Priority::None),
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// A task row joined with its category name.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub user_id: String,
    pub due_date: Option<NaiveDateTime>,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub priority: Priority,
    pub created_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Owned for Task {
    fn owner_id(&self) -> Option<&str> {
        Some(&self.user_id)
    }
}

/// Task as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub user_id: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            is_completed: task.is_completed,
            user_id: task.user_id.clone(),
            created_at: task.created_at.format(DATETIME_FORMAT).to_string(),
            due_date: task
                .due_date
                .map(|d| d.format(DATETIME_FORMAT).to_string()),
            priority: task.priority,
            category: task.category_name.clone(),
            category_id: task.category_id.clone(),
        }
    }
}

/// Request body for creating a task.
///
/// Keys are accepted in snake_case or in the PascalCase used by older clients
/// (`Title`, `DueDate`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default, alias = "Title")]
    pub title: String,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(default, alias = "DueDate")]
    pub due_date: Option<String>,
    #[serde(default, alias = "Category")]
    pub category: Option<String>,
    #[serde(default, alias = "Priority")]
    pub priority: Option<String>,
}

/// Request body for updating a task. Title, description, priority and the
/// completion flag are replaced wholesale; due date and category are kept
/// when omitted. Accepts the same key spellings as [`CreateTaskRequest`].
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, alias = "Title")]
    pub title: String,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(default, alias = "DueDate")]
    pub due_date: Option<String>,
    #[serde(default, alias = "Category")]
    pub category: Option<String>,
    #[serde(default, alias = "Priority")]
    pub priority: Option<String>,
    #[serde(default, alias = "IsCompleted")]
    pub is_completed: bool,
}

/// Validated task fields shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    /// `None` means "not supplied"
    pub due_date: Option<NaiveDateTime>,
    /// `None` means "not supplied"
    pub category: Option<String>,
    pub priority: Priority,
    pub is_completed: bool,
}

impl CreateTaskRequest {
    /// New tasks need a non-blank description; updates may clear it.
    pub fn validate(&self) -> Result<TaskDraft, AppError> {
        let draft = validate_fields(
            &self.title,
            self.description.as_deref(),
            self.due_date.as_deref(),
            self.category.as_deref(),
            self.priority.as_deref(),
            false,
        )?;
        if draft.description.trim().is_empty() {
            return Err(AppError::Validation("Description is required".to_string()));
        }
        Ok(draft)
    }
}

impl UpdateTaskRequest {
    pub fn validate(&self) -> Result<TaskDraft, AppError> {
        validate_fields(
            &self.title,
            self.description.as_deref(),
            self.due_date.as_deref(),
            self.category.as_deref(),
            self.priority.as_deref(),
            self.is_completed,
        )
    }
}

fn validate_fields(
    title: &str,
    description: Option<&str>,
    due_date: Option<&str>,
    category: Option<&str>,
    priority: Option<&str>,
    is_completed: bool,
) -> Result<TaskDraft, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if char_len(title) > 255 {
        return Err(AppError::Validation(
            "Title must be at most 255 characters".to_string(),
        ));
    }

    let description = description.unwrap_or_default();
    if char_len(description) > 1000 {
        return Err(AppError::Validation(
            "Description must be at most 1000 characters".to_string(),
        ));
    }

    let category = category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    if category.as_deref().is_some_and(|c| char_len(c) > 100) {
        return Err(AppError::Validation(
            "Category must be at most 100 characters".to_string(),
        ));
    }

    let priority = match priority.map(str::trim).filter(|p| !p.is_empty()) {
        None => Priority::None,
        Some(p) => Priority::parse(p).ok_or_else(|| {
            AppError::Validation("Priority must be one of: none, low, medium, high".to_string())
        })?,
    };

    Ok(TaskDraft {
        title: title.to_string(),
        description: description.to_string(),
        due_date: parse_due_date(due_date)?,
        category,
        priority,
        is_completed,
    })
}

/// Parse an optional due date. Blank input means "not supplied"; anything
/// else must match [`DUE_DATE_INPUT_FORMAT`].
pub fn parse_due_date(raw: Option<&str>) -> Result<Option<NaiveDateTime>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDateTime::parse_from_str(s, DUE_DATE_INPUT_FORMAT)
            .map(Some)
            .map_err(|_| {
                AppError::Validation(
                    "Invalid due date format, expected YYYY-MM-DD HH:MM".to_string(),
                )
            }),
    }
}
