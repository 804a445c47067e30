//! Search analytics entity.

use chrono::{DateTime, Utc};
use domain::models::SearchAnalyticsEntry;
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the `search_analytics` collection.
#[derive(Debug, Clone, FromRow)]
pub struct SearchAnalyticsEntity {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub system_name: String,
    pub error_code: String,
    pub timestamp: DateTime<Utc>,
}

impl From<SearchAnalyticsEntity> for SearchAnalyticsEntry {
    fn from(entity: SearchAnalyticsEntity) -> Self {
        SearchAnalyticsEntry {
            id: entity.id,
            user_id: entity.user_id,
            system_name: entity.system_name,
            error_code: entity.error_code,
            timestamp: entity.timestamp,
        }
    }
}
