#![allow(dead_code)]

use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use cadenza_server::{config::Config, db, seed, server::State};
use entity::user;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub const DOMAIN: &str = "gmail.com";
pub const FRONTEND_URL: &str = "http://localhost:3000";
pub const ADMIN_EMAIL: &str = "admin@gmail.com";
pub const ADMIN_PASSWORD: &str = "admin123";

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<State>,
    pub admin: user::Model,
}

pub fn test_config() -> Config {
    let vars: HashMap<&str, &str> = [
        ("DATABASE_URL", "sqlite::memory:"),
        // an in-memory database lives and dies with its single connection
        ("DB_MAX_CONNECTIONS", "1"),
        ("DB_MIN_CONNECTIONS", "1"),
        ("JWT_SECRET", "test-secret"),
        ("FRONTEND_URL", FRONTEND_URL),
        ("ALLOWED_EMAIL_DOMAIN", DOMAIN),
        ("STATIC_DIR", "static/images"),
    ]
    .into_iter()
    .collect();
    Config::from_lookup(|key| vars.get(key).map(|value| value.to_string())).unwrap()
}

/// A server over a fresh, seeded in-memory database.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|state| state).await
}

/// Like [`spawn_app`], letting the caller adjust the state (e.g. to register fake providers).
pub async fn spawn_app_with(customize: impl FnOnce(State) -> State) -> TestApp {
    let config = test_config();
    let db = db::connect(&config.database).await.unwrap();
    db::sync_schema(&db, false).await.unwrap();
    seed::seed_database(&db, &config).await.unwrap();
    let admin = seed::ensure_admin(&db, DOMAIN).await.unwrap();

    let state = Arc::new(customize(State::new(config, db)));
    let server = TestServer::new(cadenza_server::server::router(state.clone()).unwrap());

    TestApp {
        server,
        state,
        admin,
    }
}

impl TestApp {
    pub fn admin_token(&self) -> String {
        self.state.tokens.issue(self.admin.id).unwrap()
    }

    /// Register a regular user through the API and return the `{token, user}` body.
    pub async fn register(&self, full_name: &str, email: &str, password: &str) -> Value {
        let response = self
            .server
            .post("/api/auth/register")
            .json(&json!({ "full_name": full_name, "email": email, "password": password }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    /// A token of a freshly registered, non-admin user.
    pub async fn user_token(&self) -> String {
        let body = self
            .register("Regular User", "regular@gmail.com", "password123")
            .await;
        body["token"].as_str().unwrap().to_owned()
    }
}

pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    )
}
