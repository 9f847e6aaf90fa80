//! Bearer token authentication and role gates.
//!
//! [`protect`] runs first and stores a [`CurrentUser`] in the request
//! extensions; [`authorize`] reads it back and checks the role.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::Role;
use crate::{error::AppError, state::AppState};

/// Identity of the authenticated caller, available to handlers as
/// `Extension<CurrentUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub role: Role,
}

/// Authenticates requests using Bearer tokens from Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <jwt>
/// ```
///
/// The token must carry a valid signature, must not be expired, and its
/// subject must still exist. The role is read from storage, not from the
/// token claims.
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if the header is
/// missing or malformed, or the token does not verify.
pub async fn protect(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let user = st.auth_service.authenticate(&token).await?;

    parts.extensions.insert(CurrentUser {
        id: user.id,
        role: user.role,
    });

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}

/// Rejects callers whose role is not in the allowed set.
///
/// Must be layered inside [`protect`].
///
/// # Errors
///
/// Returns `403 Forbidden` if the role is not allowed, or `401` if no
/// identity was attached.
pub async fn authorize(
    State(roles): State<Arc<[Role]>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(user) = req.extensions().get::<CurrentUser>().copied() else {
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "Authentication required"}),
        ));
    };

    if !roles.contains(&user.role) {
        tracing::debug!(user_id = user.id, role = %user.role, "role not allowed");
        return Err(AppError::forbidden(
            format!("User role {} is not authorized to access this route", user.role),
            json!({ "role": user.role }),
        ));
    }

    Ok(next.run(req).await)
}
