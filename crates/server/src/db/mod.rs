//! Database operations for the Angadi `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `admin_user` - Admin identities, hashed secrets, roles, permission maps
//! - `announcement` - Ordered announcement log with an active flag
//! - `push_subscription` - One row per browser push endpoint
//! - `product`, `interest`, `traffic` - Catalog, lead capture, visit counters
//!
//! Queries use the runtime `query_as`/`query` API with row structs converted
//! into the domain types in [`crate::models`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p angadi-cli -- migrate
//! ```

pub mod admins;
pub mod announcements;
pub mod interests;
pub mod products;
pub mod subscriptions;
pub mod traffic;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admins::AdminRepository;
pub use announcements::AnnouncementRepository;
pub use interests::InterestRepository;
pub use products::{ProductInput, ProductRepository};
pub use subscriptions::SubscriptionRepository;
pub use traffic::TrafficRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
