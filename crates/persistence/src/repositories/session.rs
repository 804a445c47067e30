//! Session repository for database operations.

use domain::models::{NewSession, Session};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SessionEntity;

/// Repository for the `sessions` collection.
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a new session with `session_end` null. The device fingerprint is
    /// whatever the client captured at call time.
    pub async fn insert(&self, input: &NewSession) -> Result<Session, sqlx::Error> {
        let device_info = input
            .device_info
            .as_ref()
            .map(|info| serde_json::to_value(info).unwrap_or(serde_json::Value::Null));

        let entity = sqlx::query_as::<_, SessionEntity>(
            r#"
            INSERT INTO sessions (user_id, session_start, device_info, ip_address)
            VALUES ($1, NOW(), $2, $3)
            RETURNING id, user_id, session_start, session_end, device_info, ip_address
            "#,
        )
        .bind(input.user_id)
        .bind(device_info)
        .bind(&input.ip_address)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Close a session by stamping `session_end`. Calling twice simply
    /// re-writes the timestamp.
    pub async fn close(&self, session_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE sessions SET session_end = NOW() WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Close every active session for a user. Idempotent: a second run
    /// matches zero rows.
    pub async fn end_all_active_for_user(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET session_end = NOW()
            WHERE user_id = $1 AND session_end IS NULL
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Snapshot of a user's sessions, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Session>, sqlx::Error> {
        let entities = sqlx::query_as::<_, SessionEntity>(
            r#"
            SELECT id, user_id, session_start, session_end, device_info, ip_address
            FROM sessions
            WHERE user_id = $1
            ORDER BY session_start DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }
}
