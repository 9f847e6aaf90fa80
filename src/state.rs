//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::{AccountService, AuthService, CategoryService, TokenService};
use crate::domain::repositories::{AccountRepository, CategoryRepository, UserRepository};
use crate::infrastructure::memory::MemoryStore;

/// Services shared by every request.
///
/// Repositories are held as trait objects so the same state type serves both
/// PostgreSQL and in-memory storage.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<dyn UserRepository>>,
    pub category_service: Arc<CategoryService<dyn CategoryRepository, dyn AccountRepository>>,
    pub account_service: Arc<AccountService<dyn AccountRepository>>,
    /// Storage backend name reported by `/health`.
    pub storage: &'static str,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn CategoryRepository>,
        accounts: Arc<dyn AccountRepository>,
        tokens: Arc<TokenService>,
        storage: &'static str,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(users, tokens)),
            category_service: Arc::new(CategoryService::new(categories, accounts.clone())),
            account_service: Arc::new(AccountService::new(accounts)),
            storage,
        }
    }

    /// State backed by a fresh [`MemoryStore`].
    pub fn in_memory(tokens: Arc<TokenService>) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store.clone(), store, tokens, "memory")
    }
}
