//! Business-logic services on top of the repositories.

pub mod auth;
pub mod push;
