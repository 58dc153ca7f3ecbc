//! Authentication and admin-management service.
//!
//! Wraps the credential store with argon2 password handling and bearer-token
//! issuance. Everything that touches a password hash lives here.

mod error;
mod token;

pub use error::AuthError;
pub use token::{TOKEN_VALIDITY_DAYS, TokenError, TokenService, VerifiedToken};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use angadi_core::{AdminId, PermissionSet, Username};

use crate::db::RepositoryError;
use crate::db::admins::AdminRepository;
use crate::models::Admin;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles admin login and the superadmin-only admin management operations.
pub struct AuthService<'a> {
    admins: AdminRepository<'a>,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, tokens: &'a TokenService) -> Self {
        Self {
            admins: AdminRepository::new(pool),
            tokens,
        }
    }

    /// Login with username and password, issuing a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for any bad input - unknown
    /// username, unparseable username, or wrong password all look the same
    /// to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<(Admin, String), AuthError> {
        let username = Username::parse(username).map_err(|_| AuthError::InvalidCredentials)?;

        let (admin, password_hash) = self
            .admins
            .get_for_login(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = self
            .tokens
            .issue(admin.id, admin.role)
            .map_err(|_| AuthError::Signing)?;

        Ok((admin, token))
    }

    /// Create a new `admin`-role identity with an empty permission map.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` or `AuthError::WeakPassword` for
    /// bad input, and `AuthError::UserAlreadyExists` if the username is taken.
    pub async fn create_admin(&self, username: &str, password: &str) -> Result<Admin, AuthError> {
        let username = Username::parse(username)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let admin = self
            .admins
            .create(&username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(admin)
    }

    /// Partially update an admin: username, password, and/or permission map.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AdminNotFound` if the id does not name an
    /// `admin`-role record, plus the same input errors as `create_admin`.
    pub async fn update_admin(
        &self,
        id: AdminId,
        username: Option<&str>,
        password: Option<&str>,
        permissions: Option<&PermissionSet>,
    ) -> Result<Admin, AuthError> {
        let username = username.map(Username::parse).transpose()?;

        let password_hash = match password {
            Some(password) => {
                validate_password(password)?;
                Some(hash_password(password)?)
            }
            None => None,
        };

        let admin = self
            .admins
            .update(id, username.as_ref(), password_hash.as_deref(), permissions)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::AdminNotFound,
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(admin)
    }

    /// Delete an `admin`-role identity. Superadmins cannot be deleted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AdminNotFound` if nothing was deleted.
    pub async fn delete_admin(&self, id: AdminId) -> Result<(), AuthError> {
        let deleted = self.admins.delete(id).await?;

        if deleted {
            Ok(())
        } else {
            Err(AuthError::AdminNotFound)
        }
    }

    /// Replace an admin's permission map atomically.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AdminNotFound` if the id does not name an
    /// `admin`-role record.
    pub async fn replace_permissions(
        &self,
        id: AdminId,
        permissions: &PermissionSet,
    ) -> Result<Admin, AuthError> {
        self.admins
            .replace_permissions(id, permissions)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::AdminNotFound,
                other => AuthError::Repository(other),
            })
    }
}

/// Validate password strength.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// Public so the seed command can create the bootstrap superadmin with the
/// same parameters the server verifies against.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
