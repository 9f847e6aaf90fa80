use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::account::{AccountResponse, CreateAccountRequest};
use crate::api::handlers::parse_id;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/v1/accounts`
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    let accounts = state.account_service.list_accounts().await?;
    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

/// `POST /api/v1/accounts` - 201 with the created account.
pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    let Json(req) = payload?;

    let account = state
        .account_service
        .create_account(req.name, req.kind, req.currency)
        .await?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// `GET /api/v1/accounts/{id}`
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccountResponse>, AppError> {
    let id = parse_id(&id, "account")?;
    let account = state.account_service.get_account(id).await?;
    Ok(Json(account.into()))
}

/// `DELETE /api/v1/accounts/{id}` - also removes the account from every
/// category.
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, "account")?;
    state.account_service.delete_account(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
