//! Integration tests for the Tasktrack backend.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::auth::{issue_token_at, SESSION_COOKIE};
use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::rate_limit::RateLimitPolicy;
use crate::{create_router, AppState};

const TEST_SECRET: &str = "test-jwt-secret";
const PASSWORD: &str = "secret123";

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_config(Some(TEST_SECRET), RateLimitPolicy::STRICT, RateLimitPolicy::GENERAL)
            .await
    }

    async fn with_config(
        secret: Option<&str>,
        auth_rate_limit: RateLimitPolicy,
        general_rate_limit: RateLimitPolicy,
    ) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        // Create config
        let config = Config {
            jwt_secret: secret.map(str::to_string),
            db_path,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            cookie_secure: false,
            auth_rate_limit,
            general_rate_limit,
        };

        let app = create_router(AppState::new(repo, config));

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        TestFixture {
            client: Self::new_client(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    /// A client with its own cookie jar, i.e. an independent browser session.
    fn new_client() -> Client {
        Client::builder().cookie_store(true).build().unwrap()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    async fn register(&self, client: &Client, email: &str) -> reqwest::Response {
        client
            .post(self.url("/auth/register"))
            .json(&json!({"nama": "Test User", "email": email, "password": PASSWORD}))
            .send()
            .await
            .unwrap()
    }

    async fn login(&self, client: &Client, email: &str) -> reqwest::Response {
        client
            .post(self.url("/auth/login"))
            .json(&json!({"email": email, "password": PASSWORD}))
            .send()
            .await
            .unwrap()
    }

    /// Register and log in on `client`, returning it ready for protected routes.
    async fn signed_in(&self, client: &Client, email: &str) {
        assert_eq!(self.register(client, email).await.status(), StatusCode::OK);
        assert_eq!(self.login(client, email).await.status(), StatusCode::OK);
    }

    async fn create_task(&self, client: &Client, body: Value) -> Value {
        let resp = client
            .post(self.url("/task/"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = resp.json().await.unwrap();
        body["data"].clone()
    }

    async fn get_json(&self, client: &Client, path: &str) -> (StatusCode, Value) {
        let resp = client.get(self.url(path)).send().await.unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }
}

fn task_ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|t| t["task_id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json(&fixture.client, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body.get("data").is_none());

    let resp = fixture
        .client
        .get(format!("{}/", fixture.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_login_logout_cycle() {
    let fixture = TestFixture::new().await;
    let client = &fixture.client;

    let resp = fixture.register(client, "a@x.com").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User registered successfully");

    // Duplicate email
    let resp = fixture.register(client, "a@x.com").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "User already exists with this email");

    // Login sets an httpOnly, SameSite=Lax session cookie
    let resp = fixture.login(client, "a@x.com").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .expect("login should set a cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with(&format!("{}=", SESSION_COOKIE)));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    // Second login without logout is rejected
    let resp = fixture.login(client, "a@x.com").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "User is already logged in");

    let (status, body) = fixture.get_json(client, "/users/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "a@x.com");
    assert_eq!(body["data"]["nama"], "Test User");

    let resp = client
        .post(fixture.url("/auth/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Cookie was cleared
    let (status, _) = fixture.get_json(client, "/users/profile").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Session flag was reset, so a fresh login succeeds
    let resp = fixture.login(client, "a@x.com").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_bad_credentials_are_undifferentiated() {
    let fixture = TestFixture::new().await;
    fixture.register(&fixture.client, "a@x.com").await;

    let wrong_password = fixture
        .client
        .post(fixture.url("/auth/login"))
        .json(&json!({"email": "a@x.com", "password": "nope-nope"}))
        .send()
        .await
        .unwrap();
    let unknown_email = fixture.login(&fixture.client, "ghost@x.com").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let a: Value = wrong_password.json().await.unwrap();
    let b: Value = unknown_email.json().await.unwrap();
    assert_eq!(a["message"], b["message"]);
}

#[tokio::test]
async fn test_protected_routes_require_cookie() {
    let fixture = TestFixture::new().await;

    for path in ["/task/", "/users/profile", "/task/categories/"] {
        let (status, body) = fixture.get_json(&fixture.client, path).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", path);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Unauthorized");
    }

    let resp = fixture
        .client
        .post(fixture.url("/auth/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_and_forged_tokens_rejected() {
    let fixture = TestFixture::new().await;
    fixture.signed_in(&fixture.client, "a@x.com").await;

    let (_, profile) = fixture.get_json(&fixture.client, "/users/profile").await;
    let user_id = profile["data"]["id"].as_str().unwrap().to_string();

    let expired = issue_token_at(
        &user_id,
        "a@x.com",
        TEST_SECRET.as_bytes(),
        Utc::now() - chrono::Duration::hours(25),
    )
    .unwrap();
    let forged = issue_token_at(&user_id, "a@x.com", b"another-secret", Utc::now()).unwrap();

    let bare = Client::new();
    for token in [expired, forged] {
        let resp = bare
            .get(fixture.url("/users/profile"))
            .header(reqwest::header::COOKIE, format!("{}={}", SESSION_COOKIE, token))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    // A freshly issued token with the right secret is accepted
    let valid = issue_token_at(&user_id, "a@x.com", TEST_SECRET.as_bytes(), Utc::now()).unwrap();
    let resp = bare
        .get(fixture.url("/users/profile"))
        .header(reqwest::header::COOKIE, format!("{}={}", SESSION_COOKIE, valid))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_secret_is_server_error() {
    let fixture =
        TestFixture::with_config(None, RateLimitPolicy::STRICT, RateLimitPolicy::GENERAL).await;

    assert_eq!(
        fixture.register(&fixture.client, "a@x.com").await.status(),
        StatusCode::OK
    );

    let resp = fixture.login(&fixture.client, "a@x.com").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "JWT secret key is missing");
}

#[tokio::test]
async fn test_auth_rate_limit() {
    let strict = RateLimitPolicy {
        max_requests: 3,
        window: Duration::from_secs(60),
    };
    let fixture =
        TestFixture::with_config(Some(TEST_SECRET), strict, RateLimitPolicy::GENERAL).await;

    for _ in 0..3 {
        let resp = fixture.login(&fixture.client, "ghost@x.com").await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    let resp = fixture.login(&fixture.client, "ghost@x.com").await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Rate limit exceeded. Please try again later.");

    // Non-auth routes are governed by the general policy only
    let (status, _) = fixture.get_json(&fixture.client, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_general_rate_limit() {
    let general = RateLimitPolicy {
        max_requests: 5,
        window: Duration::from_secs(60),
    };
    let fixture =
        TestFixture::with_config(Some(TEST_SECRET), RateLimitPolicy::STRICT, general).await;

    for _ in 0..5 {
        let (status, _) = fixture.get_json(&fixture.client, "/health").await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, body) = fixture.get_json(&fixture.client, "/health").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_overdue_and_global_category_scenario() {
    let fixture = TestFixture::new().await;
    let client = &fixture.client;
    fixture.signed_in(client, "a@x.com").await;

    let task = fixture
        .create_task(client, json!({"title": "T1", "description": "first task", "category": "Work"}))
        .await;
    let task_id = task["task_id"].as_str().unwrap().to_string();
    assert_eq!(task["category"], "Work");
    assert_eq!(task["is_completed"], false);
    assert_eq!(task["priority"], "none");

    let (status, body) = fixture.get_json(client, "/task/overdue").await;
    assert_eq!(status, StatusCode::OK);
    assert!(task_ids(&body).is_empty());

    let resp = client
        .put(fixture.url(&format!("/task/{}", task_id)))
        .json(&json!({"title": "T1", "due_date": "2020-01-01 09:00", "is_completed": false}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["due_date"], "2020-01-01 09:00:00");
    assert_eq!(body["data"]["category"], "Work");

    let (_, body) = fixture.get_json(client, "/task/overdue").await;
    assert_eq!(task_ids(&body), vec![task_id.clone()]);

    // Look up the global "Work" category and delete it
    let (_, body) = fixture.get_json(client, "/task/categories/").await;
    let work = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "Work")
        .expect("Work should be visible")
        .clone();
    assert_eq!(work["is_global"], true);

    let resp = client
        .delete(fixture.url(&format!("/task/categories/{}", work["id"].as_str().unwrap())))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["tasks_updated"], 1);

    let (status, body) = fixture
        .get_json(client, &format!("/task/{}", task_id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].get("category").is_none());
    assert!(body["data"].get("category_id").is_none());

    // The global category itself survives
    let (_, body) = fixture.get_json(client, "/task/categories/").await;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["name"] == "Work"));
}

#[tokio::test]
async fn test_private_category_visibility_and_deletion() {
    let fixture = TestFixture::new().await;
    let alice = &fixture.client;
    let bob = &TestFixture::new_client();
    fixture.signed_in(alice, "alice@x.com").await;
    fixture.signed_in(bob, "bob@x.com").await;

    let resp = alice
        .post(fixture.url("/task/categories/"))
        .json(&json!({"name": "Errands"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    let category_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["is_global"], false);

    // Names are unique across all users
    let resp = bob
        .post(fixture.url("/task/categories/"))
        .json(&json!({"name": "Errands"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Invisible to bob
    let (_, body) = fixture.get_json(bob, "/task/categories/").await;
    assert!(!body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["name"] == "Errands"));

    let resp = bob
        .post(fixture.url("/task/"))
        .json(&json!({"title": "Sneaky", "description": "d", "category": "Errands"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Category not found");
    let available = body["data"]["available_categories"].as_array().unwrap();
    assert!(available.iter().any(|n| n == "Work"));
    assert!(!available.iter().any(|n| n == "Errands"));

    let (status, _) = fixture.get_json(bob, "/task/categories/errands").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let resp = bob
        .delete(fixture.url(&format!("/task/categories/{}", category_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Alice uses it, finds it by fragment, then deletes it
    let task = fixture
        .create_task(alice, json!({"title": "Post office", "description": "stamps", "category": "Errands"}))
        .await;
    let task_id = task["task_id"].as_str().unwrap().to_string();

    let (status, body) = fixture.get_json(alice, "/task/categories/rran").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task_ids(&body), vec![task_id.clone()]);

    let resp = alice
        .delete(fixture.url(&format!("/task/categories/{}", category_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["tasks_updated"], 1);

    let (_, body) = fixture
        .get_json(alice, &format!("/task/{}", task_id))
        .await;
    assert!(body["data"].get("category").is_none());

    let (status, _) = fixture.get_json(alice, "/task/categories/Errands").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_task_lifecycle_and_restore() {
    let fixture = TestFixture::new().await;
    let client = &fixture.client;
    fixture.signed_in(client, "a@x.com").await;

    let task = fixture
        .create_task(
            client,
            json!({"title": "Lifecycle", "description": "d", "priority": "high"}),
        )
        .await;
    let task_id = task["task_id"].as_str().unwrap().to_string();
    assert_eq!(task["priority"], "high");
    assert_eq!(task["description"], "d");

    let resp = client
        .put(fixture.url(&format!("/task/{}/complete", task_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["is_completed"], true);

    let resp = client
        .delete(fixture.url(&format!("/task/{}", task_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Task deleted successfully");

    let (_, body) = fixture.get_json(client, "/task/").await;
    assert!(task_ids(&body).is_empty());
    let (status, _) = fixture
        .get_json(client, &format!("/task/{}", task_id))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Uncomplete restores from the trash
    let resp = client
        .put(fixture.url(&format!("/task/{}/uncomplete", task_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["is_completed"], false);

    let (_, body) = fixture.get_json(client, "/task").await;
    assert_eq!(task_ids(&body), vec![task_id]);
}

#[tokio::test]
async fn test_tasks_are_private_to_owner() {
    let fixture = TestFixture::new().await;
    let alice = &fixture.client;
    let bob = &TestFixture::new_client();
    fixture.signed_in(alice, "alice@x.com").await;
    fixture.signed_in(bob, "bob@x.com").await;

    let task = fixture.create_task(alice, json!({"title": "Mine", "description": "private"})).await;
    let task_id = task["task_id"].as_str().unwrap().to_string();

    let (status, body) = fixture.get_json(bob, &format!("/task/{}", task_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found");

    let resp = bob
        .delete(fixture.url(&format!("/task/{}", task_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let (_, body) = fixture.get_json(bob, "/task/").await;
    assert!(task_ids(&body).is_empty());
}

#[tokio::test]
async fn test_search_filters_and_stats() {
    let fixture = TestFixture::new().await;
    let client = &fixture.client;
    fixture.signed_in(client, "a@x.com").await;

    let milk = fixture
        .create_task(client, json!({"title": "Buy milk", "description": "two litres", "category": "Shopping"}))
        .await;
    let report = fixture
        .create_task(
            client,
            json!({"title": "Write report", "description": "quarterly numbers", "category": "Work"}),
        )
        .await;
    let milk_id = milk["task_id"].as_str().unwrap().to_string();
    let report_id = report["task_id"].as_str().unwrap().to_string();

    let (status, body) = fixture.get_json(client, "/task/search?q=milk").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task_ids(&body), vec![milk_id.clone()]);

    let (_, body) = fixture.get_json(client, "/task/search?q=quarterly").await;
    assert_eq!(task_ids(&body), vec![report_id.clone()]);

    let (_, body) = fixture.get_json(client, "/task/search?category=Work").await;
    assert_eq!(task_ids(&body), vec![report_id.clone()]);

    let (status, body) = fixture.get_json(client, "/task/search?category=Nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"]["available_categories"].is_array());

    client
        .put(fixture.url(&format!("/task/{}/complete", milk_id)))
        .send()
        .await
        .unwrap();

    let (_, body) = fixture.get_json(client, "/task/completed").await;
    assert_eq!(task_ids(&body), vec![milk_id]);
    let (_, body) = fixture.get_json(client, "/task/pending").await;
    assert_eq!(task_ids(&body), vec![report_id]);

    let (status, body) = fixture.get_json(client, "/users/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["task_count"], 2);
    assert_eq!(body["data"]["completed_count"], 1);
    assert_eq!(body["data"]["overdue_count"], 0);
}

#[tokio::test]
async fn test_validation_errors() {
    let fixture = TestFixture::new().await;
    let client = &fixture.client;

    // Registration validation
    let resp = client
        .post(fixture.url("/auth/register"))
        .json(&json!({"nama": "A", "email": "a@x.com", "password": PASSWORD}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .post(fixture.url("/auth/register"))
        .json(&json!({"nama": "Alice", "email": "not-an-email", "password": PASSWORD}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    fixture.signed_in(client, "a@x.com").await;

    let cases = [
        json!({"title": "", "description": "d"}),
        json!({"title": "x".repeat(256), "description": "d"}),
        json!({"title": "T"}),
        json!({"title": "T", "description": "d", "due_date": "tomorrow"}),
        json!({"title": "T", "description": "d", "priority": "urgent"}),
    ];
    for case in cases {
        let resp = client
            .post(fixture.url("/task/"))
            .json(&case)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", case);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["success"], false);
    }

    // Malformed JSON renders as the same envelope
    let resp = client
        .post(fixture.url("/task/"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request"));

    let (status, _) = fixture.get_json(client, "/task/no-such-task").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pascal_case_task_bodies() {
    let fixture = TestFixture::new().await;
    let client = &fixture.client;
    fixture.signed_in(client, "a@x.com").await;

    let task = fixture
        .create_task(
            client,
            json!({
                "Title": "Legacy",
                "Description": "sent by an older client",
                "DueDate": "2030-06-01 08:00",
                "Category": "Study",
                "Priority": "medium",
            }),
        )
        .await;
    let task_id = task["task_id"].as_str().unwrap().to_string();
    assert_eq!(task["title"], "Legacy");
    assert_eq!(task["due_date"], "2030-06-01 08:00:00");
    assert_eq!(task["category"], "Study");
    assert_eq!(task["priority"], "medium");

    let resp = client
        .put(fixture.url(&format!("/task/{}", task_id)))
        .json(&json!({
            "Title": "Legacy",
            "Description": "done",
            "DueDate": "2031-01-01 00:00",
            "IsCompleted": true,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["is_completed"], true);
    assert_eq!(body["data"]["due_date"], "2031-01-01 00:00:00");
    assert_eq!(body["data"]["description"], "done");
}
