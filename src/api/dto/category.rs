//! DTOs for the category endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::api::validation::{Rule, RuleSet};
use crate::domain::entities::{Category, UpdateCategory};

/// Request body for `POST /api/v1/categories`.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

impl CreateCategoryRequest {
    pub fn rules() -> RuleSet {
        RuleSet::new().rule(Rule::NonEmpty("name"), "Name is required")
    }
}

/// Request body for `PUT /api/v1/categories/{id}`.
///
/// # `description` semantics
///
/// - **Absent** → unchanged
/// - **`null`** → cleared
/// - **String** → replaced
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
}

impl From<UpdateCategoryRequest> for UpdateCategory {
    fn from(req: UpdateCategoryRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

/// Request body for attaching or detaching member accounts.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountIdsRequest {
    pub account_ids: Vec<i64>,
}

impl AccountIdsRequest {
    pub fn rules() -> RuleSet {
        RuleSet::new().rule(Rule::Exists("accountIds"), "Account ids are required")
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            created_by: category.created_by,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}
