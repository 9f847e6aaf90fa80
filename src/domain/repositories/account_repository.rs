//! Repository trait for accounts.

use crate::domain::entities::{Account, NewAccount};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError>;

    async fn list(&self) -> Result<Vec<Account>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError>;

    /// Returns the accounts whose ids are in `ids`; unknown ids are skipped.
    async fn find_many(&self, ids: &[i64]) -> Result<Vec<Account>, AppError>;

    /// Deletes an account and its category memberships.
    ///
    /// Returns `false` if no account had this id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
