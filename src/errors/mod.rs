//! Error handling module for the task tracking backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and the
//! `{success, message, data?}` response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Message returned to clients whenever the real cause must stay server-side.
pub const GENERIC_SERVER_ERROR: &str = "Internal server error";

/// Where a missing category was looked up, which decides the status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryLookup {
    /// Validating a task payload (create, update, search filter).
    Payload,
    /// Addressing the category itself (category-scoped task listing).
    Resource,
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or missing input
    Validation(String),
    /// Missing, invalid or expired credentials
    Unauthorized(String),
    /// Acting on another user's private resource
    Forbidden(String),
    /// Resource not found (or not visible to the caller)
    NotFound(String),
    /// Category name did not resolve; carries the names the caller can see
    CategoryNotFound {
        available: Vec<String>,
        lookup: CategoryLookup,
    },
    /// Rate limit exceeded
    TooManyRequests,
    /// Database error (already logged, never shown to clients)
    Database(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::CategoryNotFound {
                lookup: CategoryLookup::Payload,
                ..
            } => StatusCode::BAD_REQUEST,
            AppError::CategoryNotFound {
                lookup: CategoryLookup::Resource,
                ..
            } => StatusCode::NOT_FOUND,
            AppError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Forbidden(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::CategoryNotFound { .. } => "Category not found".to_string(),
            AppError::TooManyRequests => {
                "Rate limit exceeded. Please try again later.".to_string()
            }
            AppError::Database(_) => GENERIC_SERVER_ERROR.to_string(),
            AppError::Internal(msg) => msg.clone(),
        }
    }

    /// Optional payload attached to the error envelope.
    pub fn data(&self) -> Option<serde_json::Value> {
        match self {
            AppError::CategoryNotFound { available, .. } => {
                Some(serde_json::json!({ "available_categories": available }))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Database(detail) => write!(f, "{}: {}", self.status_code(), detail),
            _ => write!(f, "{}: {}", self.status_code(), self.message()),
        }
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(err.to_string())
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request: {}", rejection.body_text()))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        tracing::error!("Password hashing error: {:?}", err);
        AppError::Internal(GENERIC_SERVER_ERROR.to_string())
    }
}

/// Returns true when the error is a UNIQUE constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            message: error.message(),
            data: error.data(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
