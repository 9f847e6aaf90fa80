#![allow(dead_code)]

use accounts_api::application::services::TokenService;
use accounts_api::domain::entities::Role;
use accounts_api::routes::{RouterOptions, api_router};
use accounts_api::state::AppState;
use axum::Router;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

pub fn create_test_state() -> AppState {
    AppState::in_memory(Arc::new(TokenService::new(TEST_JWT_SECRET, 3600)))
}

/// Full API over in-memory storage, rate limiting off.
pub fn spawn_app() -> TestApp {
    let state = create_test_state();
    let server = TestServer::new(api_router(state.clone(), RouterOptions::default())).unwrap();
    TestApp { server, state }
}

/// Server for a hand-built router sharing `state`.
pub fn spawn_router(router: Router) -> TestServer {
    TestServer::new(router).unwrap()
}

/// Registers a user and returns the issued token.
pub async fn register_user(server: &TestServer, name: &str, email: &str, password: &str) -> String {
    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({ "name": name, "email": email, "password": password }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

pub async fn user_token(app: &TestApp) -> String {
    register_user(&app.server, "Test User", "user@example.com", "password123").await
}

pub async fn admin_token(app: &TestApp) -> String {
    let token = register_user(&app.server, "Admin", "admin@example.com", "password123").await;
    app.state
        .auth_service
        .set_role("admin@example.com", Role::Admin)
        .await
        .unwrap();
    token
}

/// Fields named in a validation error response.
pub fn violation_fields(body: &Value) -> Vec<String> {
    body["error"]["details"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap().to_string())
        .collect()
}
