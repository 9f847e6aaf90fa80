//! Account entity: a financial-style account that categories group.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub kind: String,
    pub currency: String,
}

impl NewAccount {
    pub const DEFAULT_KIND: &'static str = "general";
    pub const DEFAULT_CURRENCY: &'static str = "USD";

    /// Builds an account, filling unset fields with defaults.
    pub fn new(name: String, kind: Option<String>, currency: Option<String>) -> Self {
        Self {
            name,
            kind: kind.unwrap_or_else(|| Self::DEFAULT_KIND.to_string()),
            currency: currency
                .map(|c| c.to_uppercase())
                .unwrap_or_else(|| Self::DEFAULT_CURRENCY.to_string()),
        }
    }
}
