//! Bootstrap superadmin seeding.
//!
//! The server never creates the superadmin itself; deployments run this
//! once after migrating. Re-running is a no-op when a superadmin already
//! exists.

use sqlx::PgPool;
use thiserror::Error;

use angadi_core::{Username, UsernameError};
use angadi_server::db::{AdminRepository, RepositoryError};
use angadi_server::services::auth;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    MissingEnvVar(#[from] super::MissingEnvVar),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Password hashing failed")]
    PasswordHash,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Create the bootstrap superadmin if no superadmin row exists.
///
/// # Errors
///
/// Returns an error if the username is invalid, hashing fails, or the
/// database is unreachable.
pub async fn run(username: &str, password: &str) -> Result<(), SeedError> {
    let username = Username::parse(username)?;
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;
    let repository = AdminRepository::new(&pool);

    if repository.superadmin_exists().await? {
        tracing::info!("Superadmin already exists, nothing to do");
        return Ok(());
    }

    let password_hash = auth::hash_password(password).map_err(|_| SeedError::PasswordHash)?;

    let admin = repository.create_superadmin(&username, &password_hash).await?;

    tracing::info!(username = %admin.username, "Superadmin created");
    Ok(())
}
