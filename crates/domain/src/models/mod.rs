//! Domain models for the telemetry engine.

pub mod activity;
pub mod log;
pub mod report;
pub mod search;
pub mod session;
pub mod stats;
pub mod user;

pub use activity::{
    truncate_label, ActivityEvent, NewActivityEvent, BUTTON_CLICK, ELEMENT_CLICK,
    ERROR_CODE_SEARCH, MAX_LABEL_LEN, PAGE_VIEW,
};
pub use log::{to_plain_text, LevelFilter, LogEntry, LogLevel, NewLogEntry, LEVELS};
pub use report::{AnalyticsSummary, Kpis, RankedCount, SearchedCodeCount};
pub use search::{NewSearchEntry, SearchAnalyticsEntry};
pub use session::{DeviceInfo, NewSession, Session};
pub use stats::{SearchedCode, UserStats};
pub use user::{CreateUserRequest, CreatedUser, RoleRecord, UserRole, UserWithStats};
