//! Role repository for database operations.

use domain::models::{RoleRecord, UserRole};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::RoleEntity;

/// Repository for the `roles` collection, one row per known user.
#[derive(Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ensure a role row exists for a user, keeping the existing role on
    /// conflict.
    pub async fn upsert(&self, user_id: Uuid, role: UserRole) -> Result<RoleRecord, sqlx::Error> {
        let entity = sqlx::query_as::<_, RoleEntity>(
            r#"
            INSERT INTO roles (user_id, role, banned)
            VALUES ($1, $2, FALSE)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, role, banned, created_at
            "#,
        )
        .bind(user_id)
        .bind(role.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Flip the banned flag. Returns the number of rows matched.
    pub async fn set_banned(&self, user_id: Uuid, banned: bool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE roles SET banned = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(banned)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Reassign a user's role. Returns the number of rows matched.
    pub async fn set_role(&self, user_id: Uuid, role: UserRole) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE roles SET role = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(role.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Every known user, newest first.
    pub async fn list(&self) -> Result<Vec<RoleRecord>, sqlx::Error> {
        let entities = sqlx::query_as::<_, RoleEntity>(
            r#"
            SELECT id, user_id, role, banned, created_at
            FROM roles
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// Look up one user's role row.
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<RoleRecord>, sqlx::Error> {
        let entity = sqlx::query_as::<_, RoleEntity>(
            r#"
            SELECT id, user_id, role, banned, created_at
            FROM roles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }
}
