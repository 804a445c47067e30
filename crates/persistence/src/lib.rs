//! Persistence layer for the HVAC Assist telemetry backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations for the telemetry collections

pub mod db;
pub mod entities;
pub mod repositories;
