//! Product domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use angadi_core::ProductId;

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Price in the store currency.
    pub price: Decimal,
    /// Description shown on the product card.
    pub description: String,
    /// Image URL (hosted externally).
    pub image_url: String,
    /// Category slug this product belongs to.
    pub category: String,
    /// Temporarily hidden from ordering without deleting the record.
    pub is_temporarily_closed: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}
