//! Repository implementations for database operations.

pub mod activity;
pub mod logs;
pub mod roles;
pub mod search_analytics;
pub mod session;

pub use activity::ActivityRepository;
pub use logs::LogRepository;
pub use roles::RoleRepository;
pub use search_analytics::SearchAnalyticsRepository;
pub use session::SessionRepository;
