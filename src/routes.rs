//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`            - Storage health check (public)
//! - `/api/v1/auth/*`         - Registration, login and profile
//! - `/api/v1/categories/*`   - Categories and membership (authenticated)
//! - `/api/v1/accounts/*`     - Accounts (authenticated)
//! - `/api/v1/users`          - User listing (admin)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the auth routes
//! - **Auth gates and validation** - Per route, see [`crate::api::routing`]
//! - **Path normalization** - Trailing slash handling

use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::handlers::{health_handler, method_not_allowed_handler, not_found_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::api::routes::{account_routes, auth_routes, category_routes, user_routes};
use crate::api::routing::AccessPolicy;
use crate::state::AppState;

/// Router switches taken from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterOptions {
    /// Enables per-IP rate limiting on the auth routes.
    pub rate_limit: bool,
    /// When `true`, rate limiting reads client IP from `X-Forwarded-For` /
    /// `X-Real-IP` headers instead of the peer socket address; enable only
    /// when the service runs behind a trusted reverse proxy.
    pub behind_proxy: bool,
}

/// Builds every route without path normalization.
pub fn api_router(state: AppState, options: RouterOptions) -> Router {
    let mut auth = auth_routes().into_router(&state);
    if options.rate_limit {
        auth = rate_limit::apply(auth, options.behind_proxy);
    }

    let v1 = Router::new()
        .nest("/auth", auth)
        .nest(
            "/categories",
            category_routes(AccessPolicy::Authenticated).into_router(&state),
        )
        .nest(
            "/accounts",
            account_routes(AccessPolicy::Authenticated).into_router(&state),
        )
        .nest("/users", user_routes().into_router(&state));

    Router::new()
        .route("/health", get(health_handler))
        .method_not_allowed_fallback(method_not_allowed_handler)
        .nest("/api/v1", v1)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service with trailing-slash normalization.
pub fn app_router(state: AppState, options: RouterOptions) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state, options))
}
