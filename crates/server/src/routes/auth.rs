//! Login endpoint.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use angadi_core::{PermissionSet, Role, Username};

use crate::error::Result;
use crate::services::auth::AuthService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub username: Username,
    pub role: Role,
    pub permissions: PermissionSet,
    pub token: String,
}

/// POST /api/login
///
/// Exchanges credentials for a bearer token. All failure modes collapse
/// into the same 401 so the response never reveals whether the username
/// exists.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let service = AuthService::new(state.pool(), state.tokens());
    let (admin, token) = service.login(&request.username, &request.password).await?;

    tracing::info!(username = %admin.username, "admin logged in");

    Ok(Json(LoginResponse {
        username: admin.username,
        role: admin.role,
        permissions: admin.permissions,
        token,
    }))
}
