//! Handlers for category CRUD and membership.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::account::AccountResponse;
use crate::api::dto::category::{
    AccountIdsRequest, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::api::handlers::parse_id;
use crate::api::middleware::CurrentUser;
use crate::domain::entities::Account;
use crate::error::AppError;
use crate::state::AppState;

fn accounts_response(accounts: Vec<Account>) -> Json<Vec<AccountResponse>> {
    Json(accounts.into_iter().map(AccountResponse::from).collect())
}

/// `GET /api/v1/categories`
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = state.category_service.list_categories().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// Creates a category owned by the caller, if any.
///
/// # Endpoint
///
/// `POST /api/v1/categories`
///
/// # Response Codes
///
/// - **201 Created**
/// - **400 Bad Request**: Validation failed
/// - **409 Conflict**: Name already taken
pub async fn create_category(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    let Json(req) = payload?;
    let created_by = user.map(|Extension(u)| u.id);

    let category = state
        .category_service
        .create_category(req.name, req.description, created_by)
        .await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// `GET /api/v1/categories/{id}`
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CategoryResponse>, AppError> {
    let id = parse_id(&id, "category")?;
    let category = state.category_service.get_category(id).await?;
    Ok(Json(category.into()))
}

/// Partially updates a category.
///
/// # Endpoint
///
/// `PUT /api/v1/categories/{id}`
///
/// # Request Body
///
/// ```json
/// { "name": "Utilities", "description": null }
/// ```
///
/// Both fields are optional; `description: null` clears the description.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCategoryRequest>, JsonRejection>,
) -> Result<Json<CategoryResponse>, AppError> {
    let id = parse_id(&id, "category")?;
    let Json(req) = payload?;

    let category = state
        .category_service
        .update_category(id, req.into())
        .await?;

    Ok(Json(category.into()))
}

/// `DELETE /api/v1/categories/{id}` - 204 on success.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, "category")?;
    state.category_service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/v1/categories/{id}/accounts`
pub async fn list_category_accounts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    let id = parse_id(&id, "category")?;
    let accounts = state.category_service.list_accounts(id).await?;
    Ok(accounts_response(accounts))
}

/// Attaches accounts to a category.
///
/// # Endpoint
///
/// `POST /api/v1/categories/{id}/accounts`
///
/// # Response Codes
///
/// - **200 OK**: The category's member accounts after the change
/// - **404 Not Found**: Unknown category, or `details.missing` lists unknown
///   account ids (nothing is attached)
pub async fn attach_accounts(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AccountIdsRequest>, JsonRejection>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    let id = parse_id(&id, "category")?;
    let Json(req) = payload?;

    let accounts = state
        .category_service
        .attach_accounts(id, req.account_ids)
        .await?;

    Ok(accounts_response(accounts))
}

/// `DELETE /api/v1/categories/{id}/accounts`
///
/// Ids that are not members are ignored.
pub async fn detach_accounts(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AccountIdsRequest>, JsonRejection>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    let id = parse_id(&id, "category")?;
    let Json(req) = payload?;

    let accounts = state
        .category_service
        .detach_accounts(id, req.account_ids)
        .await?;

    Ok(accounts_response(accounts))
}
