//! Admin identity repository.
//!
//! Holds the credential store: usernames, argon2 hashes, roles, and
//! permission maps. The hash only ever leaves this module paired with its
//! admin for login verification; everything else works with [`Admin`].

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use angadi_core::{AdminId, PermissionSet, Role, Username};

use super::RepositoryError;
use crate::models::Admin;

/// Database row for an admin identity, without the hash.
#[derive(sqlx::FromRow)]
struct AdminRow {
    id: i32,
    username: String,
    role: String,
    permissions: Json<serde_json::Value>,
    created_at: DateTime<Utc>,
}

/// Database row for an admin identity including the password hash.
#[derive(sqlx::FromRow)]
struct AdminAuthRow {
    id: i32,
    username: String,
    password_hash: String,
    role: String,
    permissions: Json<serde_json::Value>,
    created_at: DateTime<Utc>,
}

const ADMIN_COLUMNS: &str = "id, username, role, permissions, created_at";

impl AdminRow {
    fn into_domain(self) -> Result<Admin, RepositoryError> {
        into_admin(
            self.id,
            self.username,
            self.role,
            self.permissions.0,
            self.created_at,
        )
    }
}

impl AdminAuthRow {
    fn into_domain(self) -> Result<(Admin, String), RepositoryError> {
        let admin = into_admin(
            self.id,
            self.username,
            self.role,
            self.permissions.0,
            self.created_at,
        )?;
        Ok((admin, self.password_hash))
    }
}

fn into_admin(
    id: i32,
    username: String,
    role: String,
    permissions: serde_json::Value,
    created_at: DateTime<Utc>,
) -> Result<Admin, RepositoryError> {
    let username = Username::parse(&username).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
    })?;
    let role: Role = role
        .parse()
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid role in database: {e}")))?;
    let permissions: PermissionSet = serde_json::from_value(permissions).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid permission map in database: {e}"))
    })?;

    Ok(Admin {
        id: AdminId::new(id),
        username,
        role,
        permissions,
        created_at,
    })
}

/// Repository for admin identity database operations.
pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an admin by ID, hash excluded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn get_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admin_user WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(AdminRow::into_domain).transpose()
    }

    /// Get an admin and their password hash by username, for login.
    ///
    /// Returns `None` for an unknown username; the caller folds that into the
    /// same generic rejection as a wrong password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn get_for_login(
        &self,
        username: &Username,
    ) -> Result<Option<(Admin, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminAuthRow>(
            "SELECT id, username, password_hash, role, permissions, created_at \
             FROM admin_user WHERE username = $1",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(AdminAuthRow::into_domain).transpose()
    }

    /// List all `admin`-role identities, oldest first, hashes excluded.
    ///
    /// The superadmin bootstrap record is deliberately not listed; it is not
    /// editable through the admin-management surface.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn list_admins(&self) -> Result<Vec<Admin>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admin_user WHERE role = 'admin' ORDER BY created_at ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(AdminRow::into_domain).collect()
    }

    /// Create a new `admin`-role identity with an empty permission map.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken, or
    /// `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<Admin, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "INSERT INTO admin_user (username, password_hash, role) \
             VALUES ($1, $2, 'admin') \
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(username.as_str())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(unique_to_conflict)?;

        row.into_domain()
    }

    /// Create the bootstrap superadmin identity.
    ///
    /// Used by the seed command only; the HTTP surface never creates
    /// superadmins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken, or
    /// `RepositoryError::Database` for other database errors.
    pub async fn create_superadmin(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<Admin, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "INSERT INTO admin_user (username, password_hash, role) \
             VALUES ($1, $2, 'superadmin') \
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(username.as_str())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(unique_to_conflict)?;

        row.into_domain()
    }

    /// Whether any superadmin identity exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn superadmin_exists(&self) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM admin_user WHERE role = 'superadmin')",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Replace an admin's permission map atomically.
    ///
    /// Last write wins; two superadmins racing on the same admin is accepted
    /// behavior with no optimistic-concurrency check.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no `admin`-role row has this id,
    /// or `RepositoryError::Database` for other database errors.
    pub async fn replace_permissions(
        &self,
        id: AdminId,
        permissions: &PermissionSet,
    ) -> Result<Admin, RepositoryError> {
        let permissions = serde_json::to_value(permissions).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize permission map: {e}"))
        })?;

        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "UPDATE admin_user SET permissions = $2 \
             WHERE id = $1 AND role = 'admin' \
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(Json(permissions))
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.into_domain()
    }

    /// Partially update an `admin`-role identity.
    ///
    /// `None` fields are left unchanged. Role is never updatable; the WHERE
    /// clause also keeps the superadmin record out of reach of this surface.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no `admin`-role row has this id,
    /// `RepositoryError::Conflict` if the new username is taken, or
    /// `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: AdminId,
        username: Option<&Username>,
        password_hash: Option<&str>,
        permissions: Option<&PermissionSet>,
    ) -> Result<Admin, RepositoryError> {
        let permissions = permissions
            .map(|p| {
                serde_json::to_value(p).map_err(|e| {
                    RepositoryError::DataCorruption(format!(
                        "failed to serialize permission map: {e}"
                    ))
                })
            })
            .transpose()?;

        let row = sqlx::query_as::<_, AdminRow>(&format!(
            "UPDATE admin_user SET \
                 username = COALESCE($2, username), \
                 password_hash = COALESCE($3, password_hash), \
                 permissions = COALESCE($4, permissions) \
             WHERE id = $1 AND role = 'admin' \
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(username.map(Username::as_str))
        .bind(password_hash)
        .bind(permissions.map(Json))
        .fetch_optional(self.pool)
        .await
        .map_err(unique_to_conflict)?
        .ok_or(RepositoryError::NotFound)?;

        row.into_domain()
    }

    /// Hard-delete an `admin`-role identity.
    ///
    /// # Returns
    ///
    /// `true` if a row was deleted, `false` if it was already gone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: AdminId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM admin_user WHERE id = $1 AND role = 'admin'")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Map a unique violation to `Conflict`, everything else to `Database`.
fn unique_to_conflict(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("username already exists".to_owned());
    }
    RepositoryError::Database(e)
}
