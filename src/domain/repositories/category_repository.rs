//! Repository trait for categories and their account memberships.

use crate::domain::entities::{Account, Category, NewCategory, UpdateCategory};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for categories.
///
/// Membership operations assume the category exists; existence checks live in
/// [`crate::application::services::CategoryService`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a category with this name exists.
    async fn create(&self, new_category: NewCategory) -> Result<Category, AppError>;

    async fn list(&self) -> Result<Vec<Category>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError>;

    /// Applies a partial update; `Ok(None)` if the category does not exist.
    async fn update(&self, id: i64, update: UpdateCategory) -> Result<Option<Category>, AppError>;

    /// Deletes a category and its memberships; `false` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Member accounts ordered by account id.
    async fn list_accounts(&self, category_id: i64) -> Result<Vec<Account>, AppError>;

    /// Adds memberships; already-attached accounts are ignored.
    async fn attach_accounts(
        &self,
        category_id: i64,
        account_ids: &[i64],
    ) -> Result<u64, AppError>;

    /// Removes memberships; non-members are ignored.
    async fn detach_accounts(
        &self,
        category_id: i64,
        account_ids: &[i64],
    ) -> Result<u64, AppError>;
}
