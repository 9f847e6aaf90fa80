//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs carry the [`RuleSet`](crate::api::validation::RuleSet) their
//! route evaluates before the body is deserialized. Response DTOs use
//! camelCase field names.

pub mod account;
pub mod auth;
pub mod category;
pub mod health;
