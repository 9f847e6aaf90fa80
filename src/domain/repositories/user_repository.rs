//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, Role, User, UserDetails};
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Repository interface for users.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Looks a user up by (lower-cased) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Lists all users ordered by id.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Updates name and, when given, email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Conflict`] if the new email belongs to another user.
    async fn update_details(&self, id: i64, details: UserDetails) -> Result<User, AppError>;

    /// Replaces the stored password hash.
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError>;

    /// Replaces the stored preferences object.
    async fn update_preferences(
        &self,
        id: i64,
        preferences: Map<String, Value>,
    ) -> Result<User, AppError>;

    /// Changes a user's role.
    async fn set_role(&self, id: i64, role: Role) -> Result<User, AppError>;

    /// Checks that the backing store answers.
    async fn ping(&self) -> Result<(), AppError>;
}
