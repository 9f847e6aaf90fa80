//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one route table. Handlers run after the
//! route's gates and rules have passed.

pub mod accounts;
pub mod auth;
pub mod categories;
pub mod health;
pub mod users;

pub use health::health_handler;

use axum::http::Method;
use serde_json::json;

use crate::error::AppError;

/// Parses a numeric path id.
///
/// # Errors
///
/// Returns `400 Bad Request` for anything but a positive integer.
pub(crate) fn parse_id(raw: &str, resource: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().ok().filter(|id| *id > 0).ok_or_else(|| {
        AppError::bad_request(format!("Invalid {resource} id"), json!({ "id": raw }))
    })
}

/// Fallback for unmatched paths.
pub async fn not_found_handler() -> AppError {
    AppError::not_found("Route not found", json!({}))
}

/// Fallback for a known path requested with an unsupported method.
pub async fn method_not_allowed_handler(method: Method) -> AppError {
    AppError::method_not_allowed(
        format!("Method {method} is not allowed on this route"),
        json!({ "method": method.as_str() }),
    )
}
