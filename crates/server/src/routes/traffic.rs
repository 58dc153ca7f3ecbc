//! Site traffic counter endpoints.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Deserialize;

use angadi_core::Capability;

use crate::db::TrafficRepository;
use crate::error::Result;
use crate::middleware::CurrentAdmin;
use crate::models::TrafficDay;
use crate::state::AppState;

use super::require_capability;

#[derive(Debug, Default, Deserialize)]
pub struct VisitRequest {
    /// First visit from this browser today.
    #[serde(default)]
    pub unique: bool,
}

/// POST /api/traffic/visit
///
/// Public: bump today's visit counter. Sent by the storefront on page
/// load; the `unique` flag is client-asserted.
pub async fn record_visit(
    State(state): State<AppState>,
    Json(request): Json<VisitRequest>,
) -> Result<Json<TrafficDay>> {
    let today = Utc::now().date_naive();
    let day = TrafficRepository::new(state.pool())
        .record_visit(today, request.unique)
        .await?;

    Ok(Json(day))
}

/// GET /api/traffic
pub async fn list(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
) -> Result<Json<Vec<TrafficDay>>> {
    require_capability(&admin, Capability::Traffic)?;

    let days = TrafficRepository::new(state.pool()).list().await?;
    Ok(Json(days))
}
