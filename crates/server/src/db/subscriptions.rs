//! Push subscription registry repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use angadi_core::SubscriptionId;

use super::RepositoryError;
use crate::models::PushSubscription;

#[derive(sqlx::FromRow)]
struct SubscriptionRow {
    id: i32,
    endpoint: String,
    p256dh: String,
    auth: String,
    created_at: DateTime<Utc>,
}

impl From<SubscriptionRow> for PushSubscription {
    fn from(row: SubscriptionRow) -> Self {
        Self {
            id: SubscriptionId::new(row.id),
            endpoint: row.endpoint,
            p256dh: row.p256dh,
            auth: row.auth,
            created_at: row.created_at,
        }
    }
}

/// Repository for the push subscription registry.
pub struct SubscriptionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubscriptionRepository<'a> {
    /// Create a new subscription repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Register an endpoint; a re-subscribe with a known endpoint is a no-op.
    ///
    /// `ON CONFLICT DO NOTHING` on the endpoint uniqueness makes concurrent
    /// registrations of the same endpoint converge on a single row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn register(
        &self,
        endpoint: &str,
        p256dh: &str,
        auth: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO push_subscription (endpoint, p256dh, auth) VALUES ($1, $2, $3) \
             ON CONFLICT (endpoint) DO NOTHING",
        )
        .bind(endpoint)
        .bind(p256dh)
        .bind(auth)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// List every registered subscription.
    ///
    /// Unpaginated: the registry is expected to stay small in a single-store
    /// deployment, and the dispatcher consumes the whole set anyway.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<PushSubscription>, RepositoryError> {
        let rows = sqlx::query_as::<_, SubscriptionRow>(
            "SELECT id, endpoint, p256dh, auth, created_at FROM push_subscription",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Remove a subscription whose endpoint is permanently gone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove(&self, id: SubscriptionId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM push_subscription WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
