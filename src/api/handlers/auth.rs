//! Handlers for registration, login and the caller's own profile.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::api::dto::auth::{
    AuthResponse, LoginRequest, RegisterRequest, UpdateDetailsRequest, UpdatePasswordRequest,
    UserResponse,
};
use crate::api::middleware::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a user and returns a token.
///
/// # Endpoint
///
/// `POST /api/v1/auth/register`
///
/// # Response Codes
///
/// - **201 Created**: `{"token": "...", "user": {...}}`
/// - **400 Bad Request**: Validation failed
/// - **409 Conflict**: Email already registered
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let Json(req) = payload?;

    let session = state
        .auth_service
        .register(req.name, req.email, req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

/// Exchanges credentials for a token.
///
/// # Endpoint
///
/// `POST /api/v1/auth/login`
///
/// # Response Codes
///
/// - **200 OK**: `{"token": "...", "user": {...}}`
/// - **400 Bad Request**: Validation failed
/// - **401 Unauthorized**: Invalid credentials
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(req) = payload?;

    let session = state.auth_service.login(req.email, req.password).await?;

    Ok(Json(session.into()))
}

/// `GET /api/v1/auth/me`
pub async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.auth_service.get_user(user.id).await?;
    Ok(Json(user.into()))
}

/// `PUT /api/v1/auth/updatedetails`
///
/// Omitting `email` keeps the current address.
pub async fn update_details(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<UpdateDetailsRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Json(req) = payload?;

    let user = state
        .auth_service
        .update_details(user.id, req.name, req.email)
        .await?;

    Ok(Json(user.into()))
}

/// `PUT /api/v1/auth/updatepassword`
///
/// Returns a fresh token; tokens issued earlier remain valid until they
/// expire.
pub async fn update_password(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<UpdatePasswordRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(req) = payload?;

    let session = state
        .auth_service
        .update_password(user.id, req.current_password, req.new_password)
        .await?;

    Ok(Json(session.into()))
}

/// `PUT /api/v1/auth/preferences`
///
/// Shallow-merges the body into the stored preferences; `null` removes a key.
pub async fn update_preferences(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Json(patch) = payload?;

    let user = state
        .auth_service
        .update_preferences(user.id, patch)
        .await?;

    Ok(Json(user.into()))
}
