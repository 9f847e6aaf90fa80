//! Account management service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{Account, NewAccount};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;

pub struct AccountService<A: AccountRepository + ?Sized> {
    repository: Arc<A>,
}

impl<A: AccountRepository + ?Sized> AccountService<A> {
    pub fn new(repository: Arc<A>) -> Self {
        Self { repository }
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        self.repository.list().await
    }

    pub async fn create_account(
        &self,
        name: String,
        kind: Option<String>,
        currency: Option<String>,
    ) -> Result<Account, AppError> {
        let new_account = NewAccount::new(
            name.trim().to_string(),
            kind.map(|k| k.trim().to_string()),
            currency.map(|c| c.trim().to_string()),
        );

        let account = self.repository.create(new_account).await?;
        tracing::info!(account_id = account.id, "account created");
        Ok(account)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account does not exist.
    pub async fn get_account(&self, id: i64) -> Result<Account, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found", json!({ "id": id })))
    }

    /// Deletes an account, removing it from every category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account does not exist.
    pub async fn delete_account(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found("Account not found", json!({ "id": id })));
        }
        tracing::info!(account_id = id, "account deleted");
        Ok(())
    }
}
