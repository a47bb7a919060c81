//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for users, categories and tasks.

mod categories;
mod repository;
mod tasks;

pub use repository::*;
pub use tasks::TaskQuery;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use std::str::FromStr;

use crate::models::DEFAULT_CATEGORIES;

/// Initialize the database connection pool, run migrations and seed defaults.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    seed_default_categories(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            nama TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            is_logged_in INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS task_categories (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            user_id TEXT REFERENCES users(id),
            created_at TEXT NOT NULL,
            deleted_at TEXT
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            is_completed INTEGER NOT NULL DEFAULT 0,
            user_id TEXT NOT NULL REFERENCES users(id),
            due_date TEXT,
            category_id TEXT REFERENCES task_categories(id),
            priority TEXT NOT NULL DEFAULT 'none'
                CHECK (priority IN ('none', 'low', 'medium', 'high')),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            deleted_at TEXT
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for common queries
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_tasks_user_id ON tasks(user_id);
        CREATE INDEX IF NOT EXISTS idx_tasks_completed ON tasks(is_completed);
        CREATE INDEX IF NOT EXISTS idx_tasks_due_date ON tasks(due_date);
        CREATE INDEX IF NOT EXISTS idx_tasks_category_id ON tasks(category_id);
        CREATE INDEX IF NOT EXISTS idx_tasks_priority ON tasks(priority);
        CREATE INDEX IF NOT EXISTS idx_tasks_user_completed ON tasks(user_id, is_completed);
        CREATE INDEX IF NOT EXISTS idx_tasks_user_due_date ON tasks(user_id, due_date);
        CREATE INDEX IF NOT EXISTS idx_task_categories_user_id ON task_categories(user_id);
        CREATE INDEX IF NOT EXISTS idx_users_is_logged_in ON users(is_logged_in);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert the global categories when the table is empty.
async fn seed_default_categories(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM task_categories")
        .fetch_one(pool)
        .await?;
    let count: i64 = row.get("count");
    if count > 0 {
        return Ok(());
    }

    let now = Utc::now().naive_utc();
    let mut tx = pool.begin().await?;
    for name in DEFAULT_CATEGORIES {
        sqlx::query(
            "INSERT INTO task_categories (id, name, user_id, created_at) VALUES (?, ?, NULL, ?)",
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(name)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    tracing::info!("Seeded {} default categories", DEFAULT_CATEGORIES.len());
    Ok(())
}
