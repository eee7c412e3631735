//! HTTP handlers for the identity service.

pub mod auth;
pub mod users;
