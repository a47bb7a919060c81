//! User model and authentication payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{char_len, DATETIME_FORMAT};
use crate::errors::AppError;

/// A registered account. The password hash never leaves the server.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub nama: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub nama: String,
    pub email: String,
    pub users_since: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            nama: user.nama.clone(),
            email: user.email.clone(),
            users_since: user.created_at.format(DATETIME_FORMAT).to_string(),
        }
    }
}

/// Per-user task counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    pub task_count: i64,
    pub completed_count: i64,
    pub overdue_count: i64,
}

/// Request body for registration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let nama_len = char_len(self.nama.trim());
        if !(2..=100).contains(&nama_len) {
            return Err(AppError::Validation(
                "Name must be between 2 and 100 characters".to_string(),
            ));
        }
        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("A valid email is required".to_string()));
        }
        let password_len = char_len(&self.password);
        if !(6..=100).contains(&password_len) {
            return Err(AppError::Validation(
                "Password must be between 6 and 100 characters".to_string(),
            ));
        }
        Ok(())
    }
}

/// Request body for login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("A valid email is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("Password is required".to_string()));
        }
        Ok(())
    }
}

/// Minimal syntactic email check: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}
