//! Announcement domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use angadi_core::AnnouncementId;

/// A storefront announcement.
///
/// Public readers only see active announcements; admin listings are
/// unfiltered. Creation triggers a best-effort push fan-out that the created
/// record does not wait for.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    /// Unique announcement ID.
    pub id: AnnouncementId,
    /// Headline, also used as the notification title.
    pub title: String,
    /// Body text, also used as the notification body.
    pub message: String,
    /// Whether public readers can see this announcement.
    pub is_active: bool,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}
