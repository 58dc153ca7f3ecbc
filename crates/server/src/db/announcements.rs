//! Announcement repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use angadi_core::AnnouncementId;

use super::RepositoryError;
use crate::models::Announcement;

#[derive(sqlx::FromRow)]
struct AnnouncementRow {
    id: i32,
    title: String,
    message: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<AnnouncementRow> for Announcement {
    fn from(row: AnnouncementRow) -> Self {
        Self {
            id: AnnouncementId::new(row.id),
            title: row.title,
            message: row.message,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

/// Repository for announcement database operations.
pub struct AnnouncementRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AnnouncementRepository<'a> {
    /// Create a new announcement repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an announcement with a server-assigned timestamp.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including the
    /// non-empty CHECK constraints; handlers validate first for a friendlier
    /// message).
    pub async fn create(&self, title: &str, message: &str) -> Result<Announcement, RepositoryError> {
        let row = sqlx::query_as::<_, AnnouncementRow>(
            "INSERT INTO announcement (title, message) VALUES ($1, $2) \
             RETURNING id, title, message, is_active, created_at",
        )
        .bind(title)
        .bind(message)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List active announcements, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_public(&self) -> Result<Vec<Announcement>, RepositoryError> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(
            "SELECT id, title, message, is_active, created_at \
             FROM announcement WHERE is_active ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List all announcements regardless of the active flag, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Announcement>, RepositoryError> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(
            "SELECT id, title, message, is_active, created_at \
             FROM announcement ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Hard-delete an announcement; a missing id is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: AnnouncementId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM announcement WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
