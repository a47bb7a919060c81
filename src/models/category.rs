//! Task category model.

use serde::{Deserialize, Serialize};

use super::{char_len, Owned};
use crate::errors::AppError;

/// Names seeded as global categories on first boot.
pub const DEFAULT_CATEGORIES: [&str; 5] = ["Work", "Personal", "Study", "Health", "Shopping"];

/// A task category. `user_id == None` marks a global category shared by all users.
#[derive(Debug, Clone)]
pub struct TaskCategory {
    pub id: String,
    pub name: String,
    pub user_id: Option<String>,
}

impl TaskCategory {
    pub fn is_global(&self) -> bool {
        self.user_id.is_none()
    }
}

impl Owned for TaskCategory {
    fn owner_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

/// Category as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub is_global: bool,
}

impl From<&TaskCategory> for CategoryResponse {
    fn from(category: &TaskCategory) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            is_global: category.is_global(),
        }
    }
}

/// Request body for creating a private category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub name: String,
}

impl CreateCategoryRequest {
    /// Returns the trimmed name when it is acceptable.
    pub fn validated_name(&self) -> Result<String, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Category name is required".to_string()));
        }
        if char_len(name) > 100 {
            return Err(AppError::Validation(
                "Category name must be at most 100 characters".to_string(),
            ));
        }
        Ok(name.to_string())
    }
}

/// Outcome of deleting (or unlinking) a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryDeletion {
    /// Global category: the row stays, only the caller's tasks were unlinked.
    Unlinked { name: String, tasks_updated: u64 },
    /// Private category owned by the caller: tasks unlinked, row soft-deleted.
    Deleted { name: String, tasks_updated: u64 },
}

impl CategoryDeletion {
    pub fn tasks_updated(&self) -> u64 {
        match self {
            CategoryDeletion::Unlinked { tasks_updated, .. }
            | CategoryDeletion::Deleted { tasks_updated, .. } => *tasks_updated,
        }
    }

    pub fn message(&self) -> String {
        match self {
            CategoryDeletion::Unlinked {
                name,
                tasks_updated,
            } => format!(
                "Default category '{}' removed from your tasks. {} tasks updated",
                name, tasks_updated
            ),
            CategoryDeletion::Deleted {
                name,
                tasks_updated,
            } if *tasks_updated > 0 => format!(
                "Category '{}' deleted successfully and removed from {} tasks",
                name, tasks_updated
            ),
            CategoryDeletion::Deleted { name, .. } => {
                format!("Category '{}' deleted successfully", name)
            }
        }
    }
}
