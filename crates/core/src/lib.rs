//! Angadi Core - Shared types library.
//!
//! This crate provides common types used across all Angadi components:
//! - `server` - Public storefront and admin HTTP API
//! - `cli` - Command-line tools for migrations, seeding, and VAPID keys
//!
//! # Architecture
//!
//! The core crate contains only types and pure decision logic - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, usernames, roles, capabilities, and the
//!   permission decision

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
