use axum::{Json, extract::State};

use crate::api::dto::auth::UserResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every registered user.
///
/// # Endpoint
///
/// `GET /api/v1/users` (admin only)
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.auth_service.list_users().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}
