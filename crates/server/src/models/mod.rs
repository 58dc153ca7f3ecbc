//! Domain models for the Angadi API.
//!
//! These are validated domain objects separate from database row types; the
//! repositories in [`crate::db`] do the conversion. Everything here
//! serializes with camelCase keys, matching the JSON the storefront client
//! consumes.

pub mod admin;
pub mod announcement;
pub mod interest;
pub mod product;
pub mod subscription;
pub mod traffic;

pub use admin::Admin;
pub use announcement::Announcement;
pub use interest::Interest;
pub use product::Product;
pub use subscription::PushSubscription;
pub use traffic::TrafficDay;
