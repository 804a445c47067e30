//! Application log repository for database operations.

use domain::models::{LogEntry, LogLevel, NewLogEntry};
use sqlx::PgPool;

use crate::entities::LogEntryEntity;

/// Repository for the `logs` collection.
#[derive(Clone)]
pub struct LogRepository {
    pool: PgPool,
}

impl LogRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one log entry. The server stamps the timestamp.
    pub async fn insert(&self, input: &NewLogEntry) -> Result<LogEntry, sqlx::Error> {
        let entity = sqlx::query_as::<_, LogEntryEntity>(
            r#"
            INSERT INTO logs (level, message, stack_trace, user_id, page_path, timestamp)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id, level, message, stack_trace, user_id, page_path, timestamp
            "#,
        )
        .bind(input.level.as_str())
        .bind(&input.message)
        .bind(&input.stack_trace)
        .bind(&input.user_id)
        .bind(&input.page_path)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Entries newest first, optionally restricted to one severity.
    pub async fn list(&self, level: Option<LogLevel>) -> Result<Vec<LogEntry>, sqlx::Error> {
        let entities = sqlx::query_as::<_, LogEntryEntity>(
            r#"
            SELECT id, level, message, stack_trace, user_id, page_path, timestamp
            FROM logs
            WHERE ($1::text IS NULL OR level = $1)
            ORDER BY timestamp DESC
            "#,
        )
        .bind(level.map(|l| l.as_str()))
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Delete entries older than the cutoff. Returns the number of rows
    /// removed.
    pub async fn purge_older_than(&self, days: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM logs WHERE timestamp < NOW() - make_interval(days => $1)",
        )
        .bind(days)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
