//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, login, bearer authentication, profile
//! - [`services::category_service::CategoryService`] - Categories and account membership
//! - [`services::account_service::AccountService`] - Accounts
//! - [`services::token_service::TokenService`] - JWT issuance and verification
//! - [`services::password`] - Argon2 password hashing

pub mod services;
