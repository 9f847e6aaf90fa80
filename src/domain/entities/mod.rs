//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`User`] - A registered user with role and preferences
//! - [`Account`] - A financial-style account
//! - [`Category`] - A named group of accounts
//!
//! Creation and update inputs are separate structs (`NewUser`, `NewAccount`,
//! `NewCategory`, `UserDetails`, `UpdateCategory`).

pub mod account;
pub mod category;
pub mod user;

pub use account::{Account, NewAccount};
pub use category::{Category, NewCategory, UpdateCategory};
pub use user::{NewUser, Role, User, UserDetails, merge_preferences};
