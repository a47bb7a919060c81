//! Tasktrack Backend
//!
//! A multi-user task tracking REST backend with SQLite persistence, cookie-carried
//! session tokens and per-client rate limiting.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod rate_limit;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::ApiResponse;
use config::Config;
use db::Repository;
use rate_limit::RateLimit;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
    /// Limiter for `/auth/*`
    pub auth_limit: RateLimit,
    /// Limiter for every request
    pub general_limit: RateLimit,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, config: Config) -> Self {
        Self {
            repo,
            auth_limit: RateLimit::new(config.auth_rate_limit),
            general_limit: RateLimit::new(config.general_rate_limit),
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tasktrack Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.jwt_secret.is_none() {
        tracing::warn!("No JWT_SECRET_KEY configured. Login and authenticated routes will fail!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    let bind_addr = config.bind_addr;
    let state = AppState::new(repo, config);

    let _reaper = rate_limit::spawn_reaper(vec![
        state.auth_limit.limiter.clone(),
        state.general_limit.limiter.clone(),
    ]);

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_limit = state.auth_limit.clone();
    let general_limit = state.general_limit.clone();

    // Auth routes (strict rate limit)
    let auth_routes = Router::new()
        .route("/api/v1/auth/register", post(api::register))
        .route("/api/v1/auth/login", post(api::login))
        .route(
            "/api/v1/auth/logout",
            post(api::logout).route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_auth,
            )),
        )
        .layer(middleware::from_fn(move |req, next| {
            rate_limit::rate_limit_layer(auth_limit.clone(), req, next)
        }));

    // Routes that require a session cookie
    let protected_routes = Router::new()
        // Users
        .route("/api/v1/users/profile", get(api::profile))
        .route("/api/v1/users/stats", get(api::stats))
        // Tasks
        .route("/api/v1/task", get(api::list_tasks).post(api::create_task))
        .route("/api/v1/task/", get(api::list_tasks).post(api::create_task))
        .route("/api/v1/task/completed", get(api::completed_tasks))
        .route("/api/v1/task/pending", get(api::pending_tasks))
        .route("/api/v1/task/overdue", get(api::overdue_tasks))
        .route("/api/v1/task/search", get(api::search_tasks))
        .route("/api/v1/task/{id}", get(api::get_task))
        .route("/api/v1/task/{id}", put(api::update_task))
        .route("/api/v1/task/{id}", delete(api::delete_task))
        .route("/api/v1/task/{id}/complete", put(api::complete_task))
        .route("/api/v1/task/{id}/uncomplete", put(api::uncomplete_task))
        // Categories; GET takes a name fragment, DELETE an id
        .route(
            "/api/v1/task/categories",
            get(api::list_categories).post(api::create_category),
        )
        .route(
            "/api/v1/task/categories/",
            get(api::list_categories).post(api::create_category),
        )
        .route(
            "/api/v1/task/categories/{category}",
            get(api::tasks_by_category).delete(api::delete_category),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    // Health checks (no auth required)
    let health_routes = Router::new()
        .route("/", get(welcome))
        .route("/api/v1/health", get(health_check));

    Router::new()
        .merge(auth_routes)
        .merge(protected_routes)
        .merge(health_routes)
        .layer(middleware::from_fn(move |req, next| {
            rate_limit::rate_limit_layer(general_limit.clone(), req, next)
        }))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

async fn welcome() -> ApiResponse<()> {
    ApiResponse::without_data("Welcome to the Tasktrack API v1!")
}

/// Health check endpoint.
async fn health_check() -> ApiResponse<()> {
    ApiResponse::without_data("Tasktrack API v1 is healthy!")
}

#[cfg(test)]
mod tests;
