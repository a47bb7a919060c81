//! Category visibility and ownership rules.
//!
//! A category with no owner is global and visible to everyone; a private category is
//! visible to its owner only. Names are unique across all categories.

use chrono::Utc;
use sqlx::Row;

use super::repository::{category_from_row, contains_pattern, Repository};
use crate::errors::{is_unique_violation, AppError, CategoryLookup};
use crate::models::{CategoryDeletion, Owned, TaskCategory};

const CATEGORY_COLUMNS: &str = "id, name, user_id";

/// Global categories plus those owned by the bound user id.
const VISIBLE_TO_USER: &str = "(user_id IS NULL OR user_id = ?)";

impl Repository {
    /// Categories the user can see: global ones plus their own, excluding deleted.
    pub async fn list_visible_categories(
        &self,
        user_id: &str,
    ) -> Result<Vec<TaskCategory>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM task_categories
             WHERE deleted_at IS NULL AND {VISIBLE_TO_USER}
             ORDER BY name"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(category_from_row).collect())
    }

    /// Names of the categories the user can see, used as a remediation hint.
    pub async fn visible_category_names(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT name FROM task_categories
             WHERE deleted_at IS NULL AND {VISIBLE_TO_USER}
             ORDER BY name"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|row| row.get("name")).collect())
    }

    /// Get a live category by ID, regardless of owner.
    #[cfg(test)]
    pub async fn get_category(&self, id: &str) -> Result<Option<TaskCategory>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM task_categories WHERE id = ? AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(category_from_row))
    }

    /// Resolve a category visible to `user_id` whose name matches exactly.
    ///
    /// Fails with [`AppError::CategoryNotFound`] listing the visible names.
    pub async fn resolve_by_name(
        &self,
        name: &str,
        user_id: &str,
    ) -> Result<TaskCategory, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM task_categories
             WHERE name = ? AND deleted_at IS NULL AND {VISIBLE_TO_USER}"
        ))
        .bind(name)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match row.as_ref().map(category_from_row) {
            Some(category) => Ok(category),
            None => Err(self.category_not_found(user_id, CategoryLookup::Payload).await),
        }
    }

    /// Resolve a visible category whose name contains `fragment`.
    ///
    /// When several match, the user's private category wins over a global one,
    /// then the alphabetically first name.
    pub async fn resolve_by_name_fuzzy(
        &self,
        fragment: &str,
        user_id: &str,
    ) -> Result<TaskCategory, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM task_categories
             WHERE name LIKE ? ESCAPE '\\' AND deleted_at IS NULL
               AND {VISIBLE_TO_USER}
             ORDER BY (user_id IS NULL) ASC, name ASC
             LIMIT 1"
        ))
        .bind(contains_pattern(fragment))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match row.as_ref().map(category_from_row) {
            Some(category) => Ok(category),
            None => Err(self.category_not_found(user_id, CategoryLookup::Resource).await),
        }
    }

    /// Create a private category owned by `user_id`.
    pub async fn create_category(
        &self,
        name: &str,
        user_id: &str,
    ) -> Result<TaskCategory, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            "INSERT INTO task_categories (id, name, user_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(name)
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(AppError::Validation(format!(
                    "Category '{}' already exists",
                    name
                )));
            }
            Err(e) => return Err(e.into()),
        }

        Ok(TaskCategory {
            id,
            name: name.to_string(),
            user_id: Some(user_id.to_string()),
        })
    }

    /// Delete a category on behalf of `user_id`.
    ///
    /// - Global: the row stays; only the caller's tasks lose the reference.
    /// - Private, owned by someone else: [`AppError::Forbidden`], nothing changes.
    /// - Private, owned by the caller: every referencing task is unlinked, then the
    ///   category is soft-deleted.
    ///
    /// All steps run in one transaction.
    pub async fn delete_category(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<CategoryDeletion, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM task_categories WHERE id = ? AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let category = row
            .as_ref()
            .map(category_from_row)
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        if !category.visible_to(user_id) {
            return Err(AppError::Forbidden(
                "You don't have permission to delete this category".to_string(),
            ));
        }

        if category.is_global() {
            let result =
                sqlx::query("UPDATE tasks SET category_id = NULL WHERE user_id = ? AND category_id = ?")
                    .bind(user_id)
                    .bind(&category.id)
                    .execute(&mut *tx)
                    .await?;
            tx.commit().await?;

            tracing::debug!(category = %category.name, user_id, "unlinked global category");
            return Ok(CategoryDeletion::Unlinked {
                name: category.name,
                tasks_updated: result.rows_affected(),
            });
        }

        let unlinked = sqlx::query("UPDATE tasks SET category_id = NULL WHERE category_id = ?")
            .bind(&category.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE task_categories SET deleted_at = ? WHERE id = ?")
            .bind(Utc::now().naive_utc())
            .bind(&category.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(category = %category.name, user_id, "deleted private category");
        Ok(CategoryDeletion::Deleted {
            name: category.name,
            tasks_updated: unlinked.rows_affected(),
        })
    }

    async fn category_not_found(&self, user_id: &str, lookup: CategoryLookup) -> AppError {
        match self.visible_category_names(user_id).await {
            Ok(available) => AppError::CategoryNotFound { available, lookup },
            Err(e) => e,
        }
    }
}
