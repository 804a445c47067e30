//! Activity event entity.

use chrono::{DateTime, Utc};
use domain::models::ActivityEvent;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the `activity_events` collection.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityEventEntity {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub device_id: Option<String>,
    pub activity_type: String,
    pub path: Option<String>,
    pub meta: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl From<ActivityEventEntity> for ActivityEvent {
    fn from(entity: ActivityEventEntity) -> Self {
        ActivityEvent {
            id: entity.id,
            user_id: entity.user_id,
            device_id: entity.device_id,
            activity_type: entity.activity_type,
            path: entity.path,
            meta: entity.meta,
            timestamp: entity.timestamp,
        }
    }
}
