//! Domain layer for the HVAC Assist telemetry backend.
//!
//! This crate contains:
//! - Domain models (sessions, activity events, search analytics, logs, roles)
//! - Pure aggregation services (per-user statistics, admin analytics summary)

pub mod models;
pub mod services;
