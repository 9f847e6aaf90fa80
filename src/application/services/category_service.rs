//! Category management service.

use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::entities::{Account, Category, NewCategory, UpdateCategory};
use crate::domain::repositories::{AccountRepository, CategoryRepository};
use crate::error::AppError;

/// Service for categories and their member accounts.
///
/// Membership changes require the category to exist; attaching requires every
/// referenced account to exist.
pub struct CategoryService<C: CategoryRepository + ?Sized, A: AccountRepository + ?Sized> {
    categories: Arc<C>,
    accounts: Arc<A>,
}

impl<C, A> CategoryService<C, A>
where
    C: CategoryRepository + ?Sized,
    A: AccountRepository + ?Sized,
{
    pub fn new(categories: Arc<C>, accounts: Arc<A>) -> Self {
        Self {
            categories,
            accounts,
        }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.categories.list().await
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name is taken.
    pub async fn create_category(
        &self,
        name: String,
        description: Option<String>,
        created_by: Option<i64>,
    ) -> Result<Category, AppError> {
        let category = self
            .categories
            .create(NewCategory {
                name: name.trim().to_string(),
                description,
                created_by,
            })
            .await?;

        tracing::info!(category_id = category.id, "category created");
        Ok(category)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    pub async fn get_category(&self, id: i64) -> Result<Category, AppError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| category_not_found(id))
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if a blank name is given.
    /// Returns [`AppError::NotFound`] if the category does not exist.
    pub async fn update_category(
        &self,
        id: i64,
        mut update: UpdateCategory,
    ) -> Result<Category, AppError> {
        if let Some(name) = update.name.as_mut() {
            *name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::bad_request(
                    "Name cannot be blank",
                    json!({ "field": "name" }),
                ));
            }
        }

        if update.is_empty() {
            return self.get_category(id).await;
        }

        self.categories
            .update(id, update)
            .await?
            .ok_or_else(|| category_not_found(id))
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    pub async fn delete_category(&self, id: i64) -> Result<(), AppError> {
        if !self.categories.delete(id).await? {
            return Err(category_not_found(id));
        }
        tracing::info!(category_id = id, "category deleted");
        Ok(())
    }

    /// Member accounts of a category.
    pub async fn list_accounts(&self, id: i64) -> Result<Vec<Account>, AppError> {
        self.get_category(id).await?;
        self.categories.list_accounts(id).await
    }

    /// Attaches accounts and returns the resulting member list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category or any account is unknown;
    /// in the latter case nothing is attached.
    pub async fn attach_accounts(
        &self,
        id: i64,
        account_ids: Vec<i64>,
    ) -> Result<Vec<Account>, AppError> {
        self.get_category(id).await?;

        let requested = dedup(account_ids);
        let found: BTreeSet<i64> = self
            .accounts
            .find_many(&requested)
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();

        let missing: Vec<i64> = requested
            .iter()
            .copied()
            .filter(|account_id| !found.contains(account_id))
            .collect();

        if !missing.is_empty() {
            return Err(AppError::not_found(
                "Account not found",
                json!({ "missing": missing }),
            ));
        }

        let attached = self.categories.attach_accounts(id, &requested).await?;
        tracing::info!(category_id = id, attached, "accounts attached");

        self.categories.list_accounts(id).await
    }

    /// Detaches accounts and returns the resulting member list.
    pub async fn detach_accounts(
        &self,
        id: i64,
        account_ids: Vec<i64>,
    ) -> Result<Vec<Account>, AppError> {
        self.get_category(id).await?;

        let detached = self
            .categories
            .detach_accounts(id, &dedup(account_ids))
            .await?;
        tracing::info!(category_id = id, detached, "accounts detached");

        self.categories.list_accounts(id).await
    }
}

fn dedup(ids: Vec<i64>) -> Vec<i64> {
    ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

fn category_not_found(id: i64) -> AppError {
    AppError::not_found("Category not found", json!({ "id": id }))
}
