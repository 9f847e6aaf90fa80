//! HTTP middleware for request processing and protection.
//!
//! Provides the auth gates, body validation, rate limiting, and
//! observability middleware.

pub mod auth;
pub mod rate_limit;
pub mod tracing;
pub mod validate;

pub use auth::CurrentUser;
