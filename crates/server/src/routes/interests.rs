//! Lead-capture endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use angadi_core::{Capability, ProductId};

use crate::db::InterestRepository;
use crate::error::{AppError, Result};
use crate::middleware::CurrentAdmin;
use crate::models::Interest;
use crate::state::AppState;

use super::require_capability;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterestRequest {
    pub username: Option<String>,
    pub mobile: String,
    pub product_id: Option<ProductId>,
    pub product_title: Option<String>,
}

/// POST /api/interests
///
/// Public: capture a visitor's interest in a product. Anonymous visitors
/// are recorded as "Guest".
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateInterestRequest>,
) -> Result<(StatusCode, Json<Interest>)> {
    let mobile = request.mobile.trim();
    if mobile.is_empty() {
        return Err(AppError::BadRequest("mobile is required".to_owned()));
    }

    let username = request
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or("Guest");

    let interest = InterestRepository::new(state.pool())
        .create(
            username,
            mobile,
            request.product_id,
            request.product_title.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(interest)))
}

/// GET /api/interests
pub async fn list(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
) -> Result<Json<Vec<Interest>>> {
    require_capability(&admin, Capability::Interests)?;

    let interests = InterestRepository::new(state.pool()).list().await?;
    Ok(Json(interests))
}
