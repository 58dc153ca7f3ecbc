//! Announcement endpoints.
//!
//! Creating an announcement triggers the push fan-out, but the HTTP
//! response returns as soon as the row is written.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::json;

use angadi_core::{AnnouncementId, Capability};

use crate::db::AnnouncementRepository;
use crate::error::{AppError, Result};
use crate::middleware::CurrentAdmin;
use crate::models::Announcement;
use crate::state::AppState;

use super::require_capability;

#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub message: String,
}

/// GET /api/announcements
///
/// Public: active announcements, newest first.
pub async fn list_public(State(state): State<AppState>) -> Result<Json<Vec<Announcement>>> {
    let announcements = AnnouncementRepository::new(state.pool()).list_public().await?;
    Ok(Json(announcements))
}

/// GET /api/admin/announcements
///
/// Capability-gated: every announcement, active or not.
pub async fn list_all(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
) -> Result<Json<Vec<Announcement>>> {
    require_capability(&admin, Capability::Announcements)?;

    let announcements = AnnouncementRepository::new(state.pool()).list_all().await?;
    Ok(Json(announcements))
}

/// POST /api/announcements
///
/// Creates the announcement and queues push delivery. Delivery failures
/// never affect this response.
pub async fn create(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Json(request): Json<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<Announcement>)> {
    require_capability(&admin, Capability::Announcements)?;

    let title = request.title.trim();
    let message = request.message.trim();
    if title.is_empty() || message.is_empty() {
        return Err(AppError::BadRequest(
            "title and message are required".to_owned(),
        ));
    }

    let announcement = AnnouncementRepository::new(state.pool())
        .create(title, message)
        .await?;

    tracing::info!(
        id = %announcement.id,
        by = %admin.username,
        "announcement published"
    );

    if let Some(dispatcher) = state.push() {
        dispatcher.dispatch(&announcement);
    }

    Ok((StatusCode::CREATED, Json(announcement)))
}

/// DELETE /api/announcements/{id}
///
/// Hard delete, idempotent: deleting an absent id succeeds.
pub async fn delete(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<AnnouncementId>,
) -> Result<Json<serde_json::Value>> {
    require_capability(&admin, Capability::Announcements)?;

    AnnouncementRepository::new(state.pool()).delete(id).await?;

    Ok(Json(json!({ "message": "Announcement deleted" })))
}
