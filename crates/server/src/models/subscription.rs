//! Push subscription domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use angadi_core::SubscriptionId;

/// A registered browser push endpoint.
///
/// Never updated in place: rows are inserted on registration and deleted by
/// the dispatcher when a delivery reports the endpoint permanently gone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushSubscription {
    /// Unique subscription ID.
    pub id: SubscriptionId,
    /// Push service endpoint URL; unique per row.
    pub endpoint: String,
    /// Client public key for payload encryption.
    pub p256dh: String,
    /// Client auth secret for payload encryption.
    pub auth: String,
    /// When the browser registered.
    pub created_at: DateTime<Utc>,
}
