//! Customer interest (lead) domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use angadi_core::{InterestId, ProductId};

/// A captured customer lead.
///
/// The product title is denormalized so the lead stays displayable after the
/// product is deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interest {
    /// Unique interest ID.
    pub id: InterestId,
    /// Visitor-supplied name; defaults to "Guest".
    pub username: String,
    /// Contact number the visitor left.
    pub mobile: String,
    /// Product the visitor asked about, if still present.
    pub product_id: Option<ProductId>,
    /// Product title at capture time.
    pub product_title: Option<String>,
    /// When the lead was captured.
    pub created_at: DateTime<Utc>,
}
