//! Push subscription registration.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::db::SubscriptionRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// The subscription object as `PushManager.subscribe()` produces it.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub endpoint: String,
    pub keys: SubscriptionKeys,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// POST /api/subscribe
///
/// Registers a browser push subscription. Re-registering the same endpoint
/// is a no-op; the response is 201 either way so clients never need to
/// care whether they were already known.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let endpoint = Url::parse(&request.endpoint)
        .map_err(|_| AppError::BadRequest("endpoint must be a valid URL".to_owned()))?;

    if endpoint.scheme() != "https" {
        return Err(AppError::BadRequest(
            "endpoint must be an https URL".to_owned(),
        ));
    }

    if request.keys.p256dh.trim().is_empty() || request.keys.auth.trim().is_empty() {
        return Err(AppError::BadRequest(
            "subscription keys are required".to_owned(),
        ));
    }

    SubscriptionRepository::new(state.pool())
        .register(endpoint.as_str(), &request.keys.p256dh, &request.keys.auth)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Subscribed" }))))
}
