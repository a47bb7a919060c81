//! Configuration module for the task tracking backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use crate::rate_limit::RateLimitPolicy;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to sign session tokens (login fails with 500 when absent)
    pub jwt_secret: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Whether the session cookie carries the `Secure` attribute
    pub cookie_secure: bool,
    /// Limit applied to `/auth/*`
    pub auth_rate_limit: RateLimitPolicy,
    /// Limit applied to every request
    pub general_rate_limit: RateLimitPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AddrParseError> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET_KEY").ok().filter(|s| !s.is_empty());

        let db_path = env::var("TASKTRACK_DB_PATH")
            .unwrap_or_else(|_| "./data/tasktrack.sqlite".to_string())
            .into();

        let bind_addr = env::var("TASKTRACK_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()?;

        let log_level = env::var("TASKTRACK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let cookie_secure = env::var("TASKTRACK_COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE"))
            .unwrap_or(false);

        Ok(Self {
            jwt_secret,
            db_path,
            bind_addr,
            log_level,
            cookie_secure,
            auth_rate_limit: RateLimitPolicy::STRICT,
            general_rate_limit: RateLimitPolicy::GENERAL,
        })
    }
}
