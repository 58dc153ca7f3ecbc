//! Daily traffic counter domain type.

use chrono::NaiveDate;
use serde::Serialize;

/// Visit counters for one calendar day.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficDay {
    /// The day the counters cover.
    pub day: NaiveDate,
    /// Total recorded visits.
    pub visits: i64,
    /// Visits flagged unique by the client.
    pub unique_visits: i64,
}
