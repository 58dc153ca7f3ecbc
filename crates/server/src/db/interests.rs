//! Customer interest (lead) repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use angadi_core::{InterestId, ProductId};

use super::RepositoryError;
use crate::models::Interest;

#[derive(sqlx::FromRow)]
struct InterestRow {
    id: i32,
    username: String,
    mobile: String,
    product_id: Option<i32>,
    product_title: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<InterestRow> for Interest {
    fn from(row: InterestRow) -> Self {
        Self {
            id: InterestId::new(row.id),
            username: row.username,
            mobile: row.mobile,
            product_id: row.product_id.map(ProductId::new),
            product_title: row.product_title,
            created_at: row.created_at,
        }
    }
}

/// Repository for lead-capture database operations.
pub struct InterestRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InterestRepository<'a> {
    /// Create a new interest repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Capture a lead.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        username: &str,
        mobile: &str,
        product_id: Option<ProductId>,
        product_title: Option<&str>,
    ) -> Result<Interest, RepositoryError> {
        let row = sqlx::query_as::<_, InterestRow>(
            "INSERT INTO interest (username, mobile, product_id, product_title) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, username, mobile, product_id, product_title, created_at",
        )
        .bind(username)
        .bind(mobile)
        .bind(product_id.map(|id| id.as_i32()))
        .bind(product_title)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List captured leads, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Interest>, RepositoryError> {
        let rows = sqlx::query_as::<_, InterestRow>(
            "SELECT id, username, mobile, product_id, product_title, created_at \
             FROM interest ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
