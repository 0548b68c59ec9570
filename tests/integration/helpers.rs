//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use coursehub_api::{AppState, build_app};
use coursehub_auth::PasswordHasher;
use coursehub_cache::CacheManager;
use coursehub_cache::memory::MemoryCacheProvider;
use coursehub_core::config::AppConfig;
use coursehub_database::DatabasePool;

/// Academic year every test runs in.
pub const TEST_YEAR: i32 = 2024;

/// Password that satisfies the strength policy.
pub const PASSWORD: &str = "Tangerine-Orbit-Lantern-42";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
}

impl TestApp {
    /// Create a test application against `COURSEHUB_DATABASE__URL`.
    pub async fn new() -> Self {
        let url = std::env::var("COURSEHUB_DATABASE__URL")
            .expect("COURSEHUB_DATABASE__URL must point at a test database");

        let config: AppConfig = serde_json::from_value(json!({
            "database": { "url": url, "max_connections": 4, "min_connections": 0 },
            "cache": { "provider": "memory" },
            "auth": {
                "access_secret": "integration-access-secret",
                "refresh_secret": "integration-refresh-secret",
            },
        }))
        .expect("valid test config");

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        coursehub_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let db_pool = db.pool().clone();
        Self::ensure_current_year(&db_pool).await;

        let cache = Arc::new(CacheManager::from_provider(Arc::new(
            MemoryCacheProvider::new(&config.cache.memory),
        )));
        let state = AppState::build(config, db, cache).expect("Failed to build state");

        Self {
            router: build_app(state),
            db_pool,
        }
    }

    /// Make `TEST_YEAR` current and give it a root node.
    async fn ensure_current_year(pool: &PgPool) {
        sqlx::query("INSERT INTO academic_years (year, description) VALUES ($1, 'integration') ON CONFLICT DO NOTHING")
            .bind(TEST_YEAR)
            .execute(pool)
            .await
            .expect("Failed to insert academic year");
        sqlx::query("UPDATE academic_years SET is_current = FALSE WHERE year <> $1 AND is_current")
            .bind(TEST_YEAR)
            .execute(pool)
            .await
            .expect("Failed to clear current year");
        sqlx::query("UPDATE academic_years SET is_current = TRUE WHERE year = $1")
            .bind(TEST_YEAR)
            .execute(pool)
            .await
            .expect("Failed to set current year");
        sqlx::query("INSERT INTO nodes (name, academic_year) VALUES ('root', $1) ON CONFLICT DO NOTHING")
            .bind(TEST_YEAR)
            .execute(pool)
            .await
            .expect("Failed to insert root node");
    }

    /// Root node of `TEST_YEAR`.
    pub async fn root_id(&self) -> Uuid {
        sqlx::query_scalar("SELECT id FROM nodes WHERE academic_year = $1 AND parent_id IS NULL")
            .bind(TEST_YEAR)
            .fetch_one(&self.db_pool)
            .await
            .expect("root node")
    }

    /// Create an account holding `role` (by name) in `TEST_YEAR`; returns
    /// its unique login.
    pub async fn create_account(&self, prefix: &str, role: Option<&str>) -> String {
        let login = format!("{prefix}-{}", Uuid::new_v4().simple());
        let hash = PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("Failed to hash password");

        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO accounts (login, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(&login)
        .bind(&hash)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to create account");

        if let Some(role) = role {
            sqlx::query(
                r#"INSERT INTO account_metadata (account_id, academic_year, role_id)
                   SELECT $1, $2, id FROM roles WHERE name = $3"#,
            )
            .bind(id)
            .bind(TEST_YEAR)
            .bind(role)
            .execute(&self.db_pool)
            .await
            .expect("Failed to assign role");
        }

        login
    }

    /// Login and return the token pair.
    pub async fn login(&self, login: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/auth/login",
                Some(json!({ "login": login, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "Login failed: {:?}", response.body);

        let token = |key: &str| {
            response.body["data"][key]
                .as_str()
                .unwrap_or_else(|| panic!("No {key} in login response"))
                .to_string()
        };
        (token("access_token"), token("refresh_token"))
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
