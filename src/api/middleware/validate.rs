//! Declarative body validation stage.

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::api::validation::RuleSet;
use crate::error::AppError;

/// Largest body buffered for validation.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Evaluates the route's [`RuleSet`] against the JSON body.
///
/// The body is buffered and handed on unchanged. An empty or unparsable body
/// is evaluated as `{}`; malformed JSON that passes the rules is left for the
/// handler's extractor to reject.
///
/// # Errors
///
/// Returns `400` with every violated rule in `details.errors`.
pub async fn layer(
    State(rules): State<Arc<RuleSet>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (parts, body) = req.into_parts();

    let bytes = to_bytes(body, MAX_BODY_BYTES).await.map_err(|_| {
        AppError::bad_request(
            "Request body is too large or unreadable",
            json!({ "limit": MAX_BODY_BYTES }),
        )
    })?;

    let value = serde_json::from_slice::<Value>(&bytes).unwrap_or(Value::Null);

    if let Err(violations) = rules.evaluate(&value) {
        tracing::debug!(
            path = %parts.uri.path(),
            violations = violations.len(),
            "request rejected by validation"
        );
        return Err(AppError::validation(violations));
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
