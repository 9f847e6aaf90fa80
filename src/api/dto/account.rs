//! DTOs for the account endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::validation::{Rule, RuleSet};
use crate::domain::entities::Account;

/// Request body for `POST /api/v1/accounts`.
///
/// `kind` defaults to `"general"` and `currency` to `"USD"`.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub kind: Option<String>,
    pub currency: Option<String>,
}

impl CreateAccountRequest {
    pub fn rules() -> RuleSet {
        RuleSet::new()
            .rule(Rule::NonEmpty("name"), "Name is required")
            .rule(
                Rule::Optional(Box::new(Rule::NonEmpty("kind"))),
                "Kind cannot be empty",
            )
            .rule(
                Rule::Optional(Box::new(Rule::MinLength("currency", 3))),
                "Currency must be a 3-letter code",
            )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: i64,
    pub name: String,
    pub kind: String,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            kind: account.kind,
            currency: account.currency,
            created_at: account.created_at,
        }
    }
}
