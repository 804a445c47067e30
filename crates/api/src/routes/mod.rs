//! HTTP route handlers.

pub mod admin_analytics;
pub mod admin_logs;
pub mod admin_users;
pub mod events;
pub mod health;
pub mod sessions;
