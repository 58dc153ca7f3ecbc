//! Admin management endpoints. All superadmin-only.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::json;

use angadi_core::{AdminId, PermissionSet};

use crate::db::AdminRepository;
use crate::error::Result;
use crate::middleware::RequireSuperadmin;
use crate::models::Admin;
use crate::services::auth::AuthService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub permissions: Option<PermissionSet>,
}

#[derive(Debug, Deserialize)]
pub struct ReplacePermissionsRequest {
    pub permissions: PermissionSet,
}

/// POST /api/admin/create
pub async fn create(
    State(state): State<AppState>,
    RequireSuperadmin(caller): RequireSuperadmin,
    Json(request): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<Admin>)> {
    let service = AuthService::new(state.pool(), state.tokens());
    let admin = service
        .create_admin(&request.username, &request.password)
        .await?;

    tracing::info!(
        created = %admin.username,
        by = %caller.username,
        "admin account created"
    );

    Ok((StatusCode::CREATED, Json(admin)))
}

/// GET /api/admin/list
///
/// Returns every `admin`-role record. The superadmin itself is not listed;
/// it is not a manageable account.
pub async fn list(
    State(state): State<AppState>,
    RequireSuperadmin(_caller): RequireSuperadmin,
) -> Result<Json<Vec<Admin>>> {
    let admins = AdminRepository::new(state.pool()).list_admins().await?;
    Ok(Json(admins))
}

/// PATCH /api/admin/{id}/permissions
///
/// Replaces the whole permission map atomically. Concurrent edits are
/// last-write-wins.
pub async fn replace_permissions(
    State(state): State<AppState>,
    RequireSuperadmin(caller): RequireSuperadmin,
    Path(id): Path<AdminId>,
    Json(request): Json<ReplacePermissionsRequest>,
) -> Result<Json<Admin>> {
    let service = AuthService::new(state.pool(), state.tokens());
    let admin = service.replace_permissions(id, &request.permissions).await?;

    tracing::info!(
        admin = %admin.username,
        by = %caller.username,
        "permissions replaced"
    );

    Ok(Json(admin))
}

/// PUT /api/admin/{id}
///
/// Partial update: any of username, password, permissions.
pub async fn update(
    State(state): State<AppState>,
    RequireSuperadmin(_caller): RequireSuperadmin,
    Path(id): Path<AdminId>,
    Json(request): Json<UpdateAdminRequest>,
) -> Result<Json<Admin>> {
    let service = AuthService::new(state.pool(), state.tokens());
    let admin = service
        .update_admin(
            id,
            request.username.as_deref(),
            request.password.as_deref(),
            request.permissions.as_ref(),
        )
        .await?;

    Ok(Json(admin))
}

/// DELETE /api/admin/{id}
///
/// Hard delete. The subject's outstanding tokens die with the row; their
/// next request fails identity resolution.
pub async fn delete(
    State(state): State<AppState>,
    RequireSuperadmin(caller): RequireSuperadmin,
    Path(id): Path<AdminId>,
) -> Result<Json<serde_json::Value>> {
    let service = AuthService::new(state.pool(), state.tokens());
    service.delete_admin(id).await?;

    tracing::info!(%id, by = %caller.username, "admin account deleted");

    Ok(Json(json!({ "message": "Admin deleted" })))
}
