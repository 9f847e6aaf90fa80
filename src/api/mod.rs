//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into domain operations and formats
//! responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects and their rule sets
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Auth gates, validation, rate limiting and tracing
//! - [`routes`] - Route tables
//! - [`routing`] - Route table structure and router construction
//! - [`validation`] - Declarative field rules

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod routing;
pub mod validation;
