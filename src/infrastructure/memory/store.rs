use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value, json};
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{
    Account, Category, NewAccount, NewCategory, NewUser, Role, UpdateCategory, User, UserDetails,
};
use crate::domain::repositories::{AccountRepository, CategoryRepository, UserRepository};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    accounts: BTreeMap<i64, Account>,
    categories: BTreeMap<i64, Category>,
    /// `(category_id, account_id)`
    memberships: BTreeSet<(i64, i64)>,
    user_seq: i64,
    account_seq: i64,
    category_seq: i64,
}

fn next(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

/// Repository implementation backed by in-memory maps.
///
/// Ids are assigned from per-table sequences starting at 1. Data is lost when
/// the process exits.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using MemoryStore (data is not persisted)");
        Self::default()
    }
}

fn user_not_found(id: i64) -> AppError {
    AppError::not_found("User not found", json!({ "id": id }))
}

fn email_taken(email: &str) -> AppError {
    AppError::conflict(
        "Unique constraint violation",
        json!({ "constraint": "users_email_key", "email": email }),
    )
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == new_user.email) {
            return Err(email_taken(&new_user.email));
        }

        let now = Utc::now();
        let user = User {
            id: next(&mut tables.user_seq),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            preferences: Map::new(),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn update_details(&self, id: i64, details: UserDetails) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;

        if let Some(ref email) = details.email
            && tables.users.values().any(|u| u.id != id && &u.email == email)
        {
            return Err(email_taken(email));
        }

        let user = tables.users.get_mut(&id).ok_or_else(|| user_not_found(id))?;
        user.name = details.name;
        if let Some(email) = details.email {
            user.email = email;
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        let user = tables.users.get_mut(&id).ok_or_else(|| user_not_found(id))?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn update_preferences(
        &self,
        id: i64,
        preferences: Map<String, Value>,
    ) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        let user = tables.users.get_mut(&id).ok_or_else(|| user_not_found(id))?;
        user.preferences = preferences;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_role(&self, id: i64, role: Role) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        let user = tables.users.get_mut(&id).ok_or_else(|| user_not_found(id))?;
        user.role = role;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError> {
        let mut tables = self.tables.write().await;
        let account = Account {
            id: next(&mut tables.account_seq),
            name: new_account.name,
            kind: new_account.kind,
            currency: new_account.currency,
            created_at: Utc::now(),
        };
        tables.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.tables.read().await.accounts.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError> {
        Ok(self.tables.read().await.accounts.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[i64]) -> Result<Vec<Account>, AppError> {
        let tables = self.tables.read().await;
        let wanted: BTreeSet<i64> = ids.iter().copied().collect();
        Ok(wanted
            .into_iter()
            .filter_map(|id| tables.accounts.get(&id).cloned())
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let removed = tables.accounts.remove(&id).is_some();
        tables.memberships.retain(|&(_, account_id)| account_id != id);
        Ok(removed)
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn create(&self, new_category: NewCategory) -> Result<Category, AppError> {
        let mut tables = self.tables.write().await;

        if tables.categories.values().any(|c| c.name == new_category.name) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "categories_name_key" }),
            ));
        }

        let now = Utc::now();
        let category = Category {
            id: next(&mut tables.category_seq),
            name: new_category.name,
            description: new_category.description,
            created_by: new_category.created_by,
            created_at: now,
            updated_at: now,
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn list(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn update(&self, id: i64, update: UpdateCategory) -> Result<Option<Category>, AppError> {
        let mut tables = self.tables.write().await;

        if let Some(ref name) = update.name
            && tables.categories.values().any(|c| c.id != id && &c.name == name)
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "categories_name_key" }),
            ));
        }

        let Some(category) = tables.categories.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            category.name = name;
        }
        if let Some(description) = update.description {
            category.description = description;
        }
        category.updated_at = Utc::now();

        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let removed = tables.categories.remove(&id).is_some();
        tables.memberships.retain(|&(category_id, _)| category_id != id);
        Ok(removed)
    }

    async fn list_accounts(&self, category_id: i64) -> Result<Vec<Account>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .memberships
            .range((category_id, i64::MIN)..=(category_id, i64::MAX))
            .filter_map(|(_, account_id)| tables.accounts.get(account_id).cloned())
            .collect())
    }

    async fn attach_accounts(
        &self,
        category_id: i64,
        account_ids: &[i64],
    ) -> Result<u64, AppError> {
        let mut tables = self.tables.write().await;
        let attached = account_ids
            .iter()
            .filter(|&&account_id| tables.memberships.insert((category_id, account_id)))
            .count();
        Ok(attached as u64)
    }

    async fn detach_accounts(
        &self,
        category_id: i64,
        account_ids: &[i64],
    ) -> Result<u64, AppError> {
        let mut tables = self.tables.write().await;
        let detached = account_ids
            .iter()
            .filter(|&&account_id| tables.memberships.remove(&(category_id, account_id)))
            .count();
        Ok(detached as u64)
    }
}
