//! Activity event repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::{ActivityEvent, NewActivityEvent};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ActivityEventEntity;

/// Repository for the append-only `activity_events` stream.
#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one event. The server stamps the timestamp.
    pub async fn insert(&self, input: &NewActivityEvent) -> Result<ActivityEvent, sqlx::Error> {
        let entity = sqlx::query_as::<_, ActivityEventEntity>(
            r#"
            INSERT INTO activity_events (user_id, device_id, activity_type, path, meta, timestamp)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id, user_id, device_id, activity_type, path, meta, timestamp
            "#,
        )
        .bind(input.user_id)
        .bind(&input.device_id)
        .bind(&input.activity_type)
        .bind(&input.path)
        .bind(&input.meta)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Events within an inclusive time window, oldest first. Open ends are
    /// unbounded.
    pub async fn list_range(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<ActivityEvent>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ActivityEventEntity>(
            r#"
            SELECT id, user_id, device_id, activity_type, path, meta, timestamp
            FROM activity_events
            WHERE ($1::timestamptz IS NULL OR timestamp >= $1)
              AND ($2::timestamptz IS NULL OR timestamp <= $2)
            ORDER BY timestamp ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Every event attributed to one user, oldest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ActivityEvent>, sqlx::Error> {
        let entities = sqlx::query_as::<_, ActivityEventEntity>(
            r#"
            SELECT id, user_id, device_id, activity_type, path, meta, timestamp
            FROM activity_events
            WHERE user_id = $1
            ORDER BY timestamp ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }
}
