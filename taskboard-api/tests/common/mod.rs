//! Common test utilities for integration tests
//!
//! - Router construction against a lazy pool (no database needed)
//! - Test database setup for the `#[ignore]`d end-to-end tests
//! - User creation and token generation
//! - A small request helper returning status and JSON body

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::Value;
use sqlx::PgPool;
use taskboard_api::{
    app::{build_router, AppState},
    config::{ApiConfig, Config, DatabaseConfig, JwtConfig, RulesConfig},
};
use taskboard_shared::{
    auth::{
        jwt::{create_token, Claims},
        password::hash_password,
    },
    db::{
        pool::{create_pool, DatabaseConfig as PoolConfig},
        schema::ensure_schema,
    },
    models::user::{CreateUser, User},
};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret-key-at-least-32-bytes-long";
pub const TEST_PASSWORD: &str = "Test@1234";

/// Config for tests, independent of the process environment
pub fn test_config(database_url: &str) -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: database_url.to_string(),
            max_connections: 5,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            expires_in_hours: 24,
        },
        rules: RulesConfig::default(),
    }
}

/// Router over a pool that never connects
///
/// Only usable for requests rejected before any query runs.
pub fn lazy_app() -> Router {
    let config = test_config("postgres://localhost/unused");
    let pool = PgPool::connect_lazy(&config.database.url).expect("lazy pool");
    build_router(AppState::new(pool, config))
}

/// Signs a token for `user_id` with the test secret
pub fn token_for(user_id: Uuid) -> String {
    create_token(&Claims::for_user(user_id, Duration::hours(1)), TEST_JWT_SECRET)
        .expect("token")
}

/// Sends one request and returns the status and parsed JSON body
///
/// An empty body is returned as `Value::Null`.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    send_request(app, request).await
}

/// Sends a prepared request
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!("non-JSON body ({status}): {}", String::from_utf8_lossy(&bytes))
        })
    };

    (status, json)
}

/// Resources for the end-to-end tests
pub struct TestContext {
    pub db: PgPool,
    pub app: Router,
    pub config: Config,
}

impl TestContext {
    /// Connects to `DATABASE_URL` and ensures the schema exists
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_config(|_| {}).await
    }

    /// Like [`TestContext::new`] with a config tweak applied first
    pub async fn with_config(tweak: impl FnOnce(&mut Config)) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let url = std::env::var("DATABASE_URL")?;

        let mut config = test_config(&url);
        tweak(&mut config);

        let db = create_pool(PoolConfig {
            max_connections: config.database.max_connections,
            ..PoolConfig::with_url(url)
        })
        .await?;
        ensure_schema(&db).await?;

        let app = build_router(AppState::new(db.clone(), config.clone()));

        Ok(Self { db, app, config })
    }

    /// Creates a live user with a unique email and returns it with a token
    pub async fn create_user(&self, first_name: &str) -> anyhow::Result<(User, String)> {
        let user = User::create(
            &self.db,
            CreateUser {
                first_name: first_name.to_string(),
                last_name: None,
                email: unique_email(first_name),
                password_hash: hash_password(TEST_PASSWORD)?,
            },
        )
        .await?;

        let token = token_for(user.id);
        Ok((user, token))
    }
}

/// Assignment rows pointing at `task_id`
pub async fn assignment_count(db: &PgPool, task_id: Uuid) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM assignments WHERE task_id = $1")
        .bind(task_id)
        .fetch_one(db)
        .await
        .expect("assignment count");
    count
}

/// Assignment rows held by `user_id`
pub async fn assigned_count(db: &PgPool, user_id: Uuid) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM assignments WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(db)
        .await
        .expect("assigned count");
    count
}

/// `{prefix}-{uuid}@example.com`
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix.to_lowercase(), Uuid::new_v4())
}
