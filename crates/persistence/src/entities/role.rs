//! Role entity.

use chrono::{DateTime, Utc};
use domain::models::{RoleRecord, UserRole};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the `roles` collection.
#[derive(Debug, Clone, FromRow)]
pub struct RoleEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    /// One of `admin`, `moderator`, `user`.
    pub role: String,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
}

impl From<RoleEntity> for RoleRecord {
    fn from(entity: RoleEntity) -> Self {
        RoleRecord {
            id: entity.id,
            user_id: entity.user_id,
            role: entity.role.parse::<UserRole>().unwrap_or_default(),
            banned: entity.banned,
            created_at: entity.created_at,
        }
    }
}
