//! Database repository for user accounts, plus the row conversions shared by
//! the category and task operations.

use chrono::{NaiveDateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::errors::{is_unique_violation, AppError};
use crate::models::{Priority, Task, TaskCategory, User, UserStats};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pub(super) pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== USER OPERATIONS ====================

    /// Get a user by ID.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            "SELECT id, nama, email, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Get a user by email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            "SELECT id, nama, email, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Create a new user. The email must not be registered yet.
    pub async fn create_user(
        &self,
        nama: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            "INSERT INTO users (id, nama, email, password_hash, is_logged_in, created_at) VALUES (?, ?, ?, ?, 0, ?)",
        )
        .bind(&id)
        .bind(nama)
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(AppError::Validation(
                    "User already exists with this email".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        Ok(User {
            id,
            nama: nama.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
        })
    }

    /// Atomically flip the session flag from false to true.
    ///
    /// Returns false when the user already holds a session (or does not exist).
    pub async fn try_begin_session(&self, user_id: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE users SET is_logged_in = 1 WHERE id = ? AND is_logged_in = 0")
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Clear the session flag.
    pub async fn end_session(&self, user_id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET is_logged_in = 0 WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Task counters for a user, over tasks that are not in the trash.
    pub async fn user_stats(&self, user_id: &str) -> Result<UserStats, AppError> {
        let now = Utc::now().naive_utc();
        let row = sqlx::query(
            r#"SELECT
                   COUNT(*) AS task_count,
                   COALESCE(SUM(CASE WHEN is_completed = 1 THEN 1 ELSE 0 END), 0) AS completed_count,
                   COALESCE(SUM(CASE WHEN is_completed = 0 AND due_date IS NOT NULL AND due_date < ? THEN 1 ELSE 0 END), 0) AS overdue_count
               FROM tasks
               WHERE user_id = ? AND deleted_at IS NULL"#,
        )
        .bind(now)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(UserStats {
            task_count: row.get("task_count"),
            completed_count: row.get("completed_count"),
            overdue_count: row.get("overdue_count"),
        })
    }
}

// Helper functions for row conversion

pub(super) fn user_from_row(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        nama: row.get("nama"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    }
}

pub(super) fn category_from_row(row: &SqliteRow) -> TaskCategory {
    TaskCategory {
        id: row.get("id"),
        name: row.get("name"),
        user_id: row.get("user_id"),
    }
}

pub(super) fn task_from_row(row: &SqliteRow) -> Task {
    let is_completed: i32 = row.get("is_completed");
    let priority: String = row.get("priority");
    let due_date: Option<NaiveDateTime> = row.get("due_date");
    Task {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        is_completed: is_completed != 0,
        user_id: row.get("user_id"),
        due_date,
        category_id: row.get("category_id"),
        category_name: row.get("category_name"),
        priority: Priority::parse(&priority).unwrap_or_default(),
        created_at: row.get("created_at"),
        deleted_at: row.get("deleted_at"),
    }
}

/// Build a `LIKE` pattern matching `fragment` anywhere, escaping wildcards with `\`.
pub(super) fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
