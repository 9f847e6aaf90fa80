//! Repository trait definitions for the domain layer.
//!
//! Traits define the data-access contract; implementations live in
//! `crate::infrastructure`. Mock implementations are generated via `mockall`
//! for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Users, credentials, roles and preferences
//! - [`AccountRepository`] - Accounts
//! - [`CategoryRepository`] - Categories and account membership

pub mod account_repository;
pub mod category_repository;
pub mod user_repository;

pub use account_repository::AccountRepository;
pub use category_repository::CategoryRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
