//! Log entry entity.

use chrono::{DateTime, Utc};
use domain::models::{LogEntry, LogLevel};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the `logs` collection.
#[derive(Debug, Clone, FromRow)]
pub struct LogEntryEntity {
    pub id: Uuid,

    /// Severity stored as its canonical string form, e.g. `Critical`.
    pub level: String,

    pub message: String,

    /// Structured stack trace blob, when captured.
    pub stack_trace: Option<serde_json::Value>,

    pub user_id: Option<String>,

    pub page_path: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl From<LogEntryEntity> for LogEntry {
    fn from(entity: LogEntryEntity) -> Self {
        // Rows predating the taxonomy (or hand-inserted) degrade to Info.
        let level = entity.level.parse::<LogLevel>().unwrap_or(LogLevel::Info);

        LogEntry {
            id: entity.id,
            level,
            message: entity.message,
            stack_trace: entity.stack_trace,
            user_id: entity.user_id,
            page_path: entity.page_path,
            timestamp: entity.timestamp,
        }
    }
}
