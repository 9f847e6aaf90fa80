mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

// ─── register ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_register_success() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({ "name": "Ada", "email": "Ada@Example.com", "password": "secret1" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("createdAt").is_some());
}

#[tokio::test]
async fn test_register_reports_every_violation() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({ "name": "A", "email": "bad", "password": "123" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(common::violation_fields(&body), vec!["email", "password"]);
    assert_eq!(
        body["error"]["details"]["errors"][1]["message"],
        "Please enter a password with 6 or more characters"
    );
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = common::spawn_app();

    for (body, expected) in [
        (json!({ "email": "a@b.co", "password": "secret1" }), vec!["name"]),
        (json!({ "name": "Ada", "password": "secret1" }), vec!["email"]),
        (json!({ "name": "Ada", "email": "a@b.co" }), vec!["password"]),
        (json!({}), vec!["name", "email", "password"]),
    ] {
        let response = app.server.post("/api/v1/auth/register").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(common::violation_fields(&response.json::<Value>()), expected);
    }
}

#[tokio::test]
async fn test_register_validation_failure_does_not_create_user() {
    let app = common::spawn_app();

    app.server
        .post("/api/v1/auth/register")
        .json(&json!({ "name": "", "email": "ada@example.com", "password": "secret1" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Would be 409 if the first request had reached the handler.
    common::register_user(&app.server, "Ada", "ada@example.com", "secret1").await;
}

#[tokio::test]
async fn test_register_without_body() {
    let app = common::spawn_app();

    let response = app.server.post("/api/v1/auth/register").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        common::violation_fields(&response.json::<Value>()),
        vec!["name", "email", "password"]
    );
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = common::spawn_app();
    common::register_user(&app.server, "Ada", "ada@example.com", "secret1").await;

    let response = app
        .server
        .post("/api/v1/auth/register")
        .json(&json!({ "name": "Other", "email": "ADA@example.com", "password": "secret2" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], "conflict");
}

// ─── login ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let app = common::spawn_app();
    common::register_user(&app.server, "Ada", "ada@example.com", "secret1").await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "ada@example.com", "password": "secret1" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["name"], "Ada");
}

#[tokio::test]
async fn test_login_wrong_password_reaches_handler() {
    let app = common::spawn_app();
    common::register_user(&app.server, "Ada", "ada@example.com", "secret1").await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "ada@example.com", "password": "x" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_validation() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "not-an-email" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        common::violation_fields(&response.json::<Value>()),
        vec!["email", "password"]
    );
}

#[tokio::test]
async fn test_login_empty_password_passes_validation() {
    let app = common::spawn_app();

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

// ─── protected routes ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_protected_routes_require_credentials() {
    let app = common::spawn_app();

    let requests = [
        app.server.get("/api/v1/auth/me"),
        app.server.put("/api/v1/auth/updatedetails").json(&json!({})),
        app.server.put("/api/v1/auth/updatepassword").json(&json!({})),
        app.server.put("/api/v1/auth/preferences").json(&json!({})),
    ];

    for request in requests {
        let response = request.await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()["www-authenticate"], "Bearer");
        assert_eq!(response.json::<Value>()["error"]["code"], "unauthorized");
    }
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let app = common::spawn_app();

    let response = app
        .server
        .get("/api/v1/auth/me")
        .authorization_bearer("not.a.jwt")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    let app = common::spawn_app();
    let foreign = accounts_api::application::services::TokenService::new(
        "another-secret-another-secret-another",
        3600,
    );
    let token = foreign
        .issue(1, accounts_api::domain::entities::Role::Admin)
        .unwrap();

    let response = app
        .server
        .get("/api/v1/auth/me")
        .authorization_bearer(token)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let app = common::spawn_app();
    let token = common::user_token(&app).await;

    let response = app
        .server
        .get("/api/v1/auth/me")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["email"], "user@example.com");
}

// ─── updatedetails ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_details_without_email() {
    let app = common::spawn_app();
    let token = common::user_token(&app).await;

    let response = app
        .server
        .put("/api/v1/auth/updatedetails")
        .authorization_bearer(&token)
        .json(&json!({ "name": "Renamed" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["name"], "Renamed");
    assert_eq!(body["email"], "user@example.com");
}

#[tokio::test]
async fn test_update_details_rejects_invalid_email() {
    let app = common::spawn_app();
    let token = common::user_token(&app).await;

    let response = app
        .server
        .put("/api/v1/auth/updatedetails")
        .authorization_bearer(&token)
        .json(&json!({ "name": "Renamed", "email": "nope" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(common::violation_fields(&response.json::<Value>()), vec!["email"]);
}

#[tokio::test]
async fn test_update_details_email_taken() {
    let app = common::spawn_app();
    let token = common::user_token(&app).await;
    common::register_user(&app.server, "Other", "other@example.com", "secret1").await;

    let response = app
        .server
        .put("/api/v1/auth/updatedetails")
        .authorization_bearer(&token)
        .json(&json!({ "name": "Me", "email": "other@example.com" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

// ─── updatepassword ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_password_cites_new_password() {
    let app = common::spawn_app();
    let token = common::user_token(&app).await;

    let response = app
        .server
        .put("/api/v1/auth/updatepassword")
        .authorization_bearer(&token)
        .json(&json!({ "currentPassword": "x" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        common::violation_fields(&response.json::<Value>()),
        vec!["newPassword"]
    );
}

#[tokio::test]
async fn test_update_password_without_auth_skips_validation() {
    let app = common::spawn_app();

    let response = app
        .server
        .put("/api/v1/auth/updatepassword")
        .json(&json!({ "currentPassword": "x" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_password_flow() {
    let app = common::spawn_app();
    let token = common::user_token(&app).await;

    let wrong = app
        .server
        .put("/api/v1/auth/updatepassword")
        .authorization_bearer(&token)
        .json(&json!({ "currentPassword": "wrong-one", "newPassword": "newsecret" }))
        .await;
    wrong.assert_status(StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .put("/api/v1/auth/updatepassword")
        .authorization_bearer(&token)
        .json(&json!({ "currentPassword": "password123", "newPassword": "newsecret" }))
        .await;
    response.assert_status_ok();
    assert!(response.json::<Value>()["token"].is_string());

    app.server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "user@example.com", "password": "newsecret" }))
        .await
        .assert_status_ok();

    app.server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "user@example.com", "password": "password123" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ─── preferences ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_preferences_merge() {
    let app = common::spawn_app();
    let token = common::user_token(&app).await;

    app.server
        .put("/api/v1/auth/preferences")
        .authorization_bearer(&token)
        .json(&json!({ "currency": "EUR", "theme": "dark" }))
        .await
        .assert_status_ok();

    let response = app
        .server
        .put("/api/v1/auth/preferences")
        .authorization_bearer(&token)
        .json(&json!({ "theme": null, "locale": "de" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["preferences"],
        json!({ "currency": "EUR", "locale": "de" })
    );
}

#[tokio::test]
async fn test_preferences_must_be_object() {
    let app = common::spawn_app();
    let token = common::user_token(&app).await;

    let response = app
        .server
        .put("/api/v1/auth/preferences")
        .authorization_bearer(&token)
        .json(&json!(["dark"]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "bad_request");
}
