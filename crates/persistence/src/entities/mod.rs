//! Database entity definitions.
//!
//! Entities are direct mappings to database rows. Each telemetry collection
//! has an explicit typed row shape; nothing in the core relies on
//! loosely-typed rows.

pub mod activity_event;
pub mod log_entry;
pub mod role;
pub mod search_analytics;
pub mod session;

pub use activity_event::ActivityEventEntity;
pub use log_entry::LogEntryEntity;
pub use role::RoleEntity;
pub use search_analytics::SearchAnalyticsEntity;
pub use session::SessionEntity;
