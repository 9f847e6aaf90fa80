//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries against the schema in `migrations/`.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Users and credentials
//! - [`PgAccountRepository`] - Accounts
//! - [`PgCategoryRepository`] - Categories and memberships

pub mod pg_account_repository;
pub mod pg_category_repository;
pub mod pg_user_repository;

pub use pg_account_repository::PgAccountRepository;
pub use pg_category_repository::PgCategoryRepository;
pub use pg_user_repository::PgUserRepository;
