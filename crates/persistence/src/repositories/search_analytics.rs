//! Search analytics repository for database operations.

use domain::models::{NewSearchEntry, SearchAnalyticsEntry};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SearchAnalyticsEntity;

/// Repository for the append-only `search_analytics` collection.
#[derive(Clone)]
pub struct SearchAnalyticsRepository {
    pool: PgPool,
}

impl SearchAnalyticsRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record one error-code search.
    pub async fn insert(&self, input: &NewSearchEntry) -> Result<SearchAnalyticsEntry, sqlx::Error> {
        let entity = sqlx::query_as::<_, SearchAnalyticsEntity>(
            r#"
            INSERT INTO search_analytics (user_id, system_name, error_code, timestamp)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, user_id, system_name, error_code, timestamp
            "#,
        )
        .bind(input.user_id)
        .bind(&input.system_name)
        .bind(&input.error_code)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }

    /// Every search attributed to one user, oldest first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<SearchAnalyticsEntry>, sqlx::Error> {
        let entities = sqlx::query_as::<_, SearchAnalyticsEntity>(
            r#"
            SELECT id, user_id, system_name, error_code, timestamp
            FROM search_analytics
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
