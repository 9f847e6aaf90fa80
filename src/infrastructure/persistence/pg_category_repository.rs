//! PostgreSQL implementation of category repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use super::pg_account_repository::AccountRow;
use crate::domain::entities::{Account, Category, NewCategory, UpdateCategory};
use crate::domain::repositories::CategoryRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    description: Option<String>,
    created_by: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL repository for categories.
///
/// Memberships live in `category_accounts` keyed by `(category_id, account_id)`.
pub struct PgCategoryRepository {
    pool: Arc<PgPool>,
}

impl PgCategoryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, new_category: NewCategory) -> Result<Category, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name, description, created_by)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, created_by, created_at, updated_at
            "#,
        )
        .bind(&new_category.name)
        .bind(&new_category.description)
        .bind(new_category.created_by)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, created_by, created_at, updated_at
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, created_by, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Category::from))
    }

    async fn update(&self, id: i64, update: UpdateCategory) -> Result<Option<Category>, AppError> {
        let (set_description, description) = match update.description {
            Some(description) => (true, description),
            None => (false, None),
        };

        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, created_by, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(set_description)
        .bind(description)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Category::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_accounts(&self, category_id: i64) -> Result<Vec<Account>, AppError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT a.id, a.name, a.kind, a.currency, a.created_at
            FROM accounts a
            JOIN category_accounts ca ON ca.account_id = a.id
            WHERE ca.category_id = $1
            ORDER BY a.id
            "#,
        )
        .bind(category_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Account::from).collect())
    }

    async fn attach_accounts(
        &self,
        category_id: i64,
        account_ids: &[i64],
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO category_accounts (category_id, account_id)
            SELECT $1, UNNEST($2::BIGINT[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(category_id)
        .bind(account_ids)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn detach_accounts(
        &self,
        category_id: i64,
        account_ids: &[i64],
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "DELETE FROM category_accounts WHERE category_id = $1 AND account_id = ANY($2)",
        )
        .bind(category_id)
        .bind(account_ids)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }
}
