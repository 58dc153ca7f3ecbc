//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication and admin management.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid username format.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] angadi_core::UsernameError),

    /// Invalid credentials (wrong password or user not found).
    ///
    /// Deliberately a single variant: login rejections never reveal which
    /// field was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Target admin record not found.
    #[error("admin not found")]
    AdminNotFound,

    /// Username already taken.
    #[error("admin already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Token signing error.
    #[error("token signing error")]
    Signing,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
