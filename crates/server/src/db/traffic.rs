//! Daily traffic counter repository.

use chrono::NaiveDate;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::TrafficDay;

#[derive(sqlx::FromRow)]
struct TrafficRow {
    day: NaiveDate,
    visits: i64,
    unique_visits: i64,
}

impl From<TrafficRow> for TrafficDay {
    fn from(row: TrafficRow) -> Self {
        Self {
            day: row.day,
            visits: row.visits,
            unique_visits: row.unique_visits,
        }
    }
}

/// Repository for per-day visit counters.
pub struct TrafficRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TrafficRepository<'a> {
    /// Create a new traffic repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a visit for `day`, creating the row if needed.
    ///
    /// The upsert makes concurrent visits safe without any locking.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn record_visit(
        &self,
        day: NaiveDate,
        unique: bool,
    ) -> Result<TrafficDay, RepositoryError> {
        let row = sqlx::query_as::<_, TrafficRow>(
            "INSERT INTO traffic (day, visits, unique_visits) \
             VALUES ($1, 1, CASE WHEN $2 THEN 1 ELSE 0 END) \
             ON CONFLICT (day) DO UPDATE SET \
                 visits = traffic.visits + 1, \
                 unique_visits = traffic.unique_visits + CASE WHEN $2 THEN 1 ELSE 0 END \
             RETURNING day, visits, unique_visits",
        )
        .bind(day)
        .bind(unique)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List per-day counters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<TrafficDay>, RepositoryError> {
        let rows = sqlx::query_as::<_, TrafficRow>(
            "SELECT day, visits, unique_visits FROM traffic ORDER BY day DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
