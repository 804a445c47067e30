//! User administration workflows.
//!
//! These operations are administrative: failures surface to the operator
//! instead of being swallowed like telemetry writes.

use domain::models::{RoleRecord, UserRole, UserStats, UserWithStats};
use domain::services::compute_user_stats;
use persistence::repositories::{
    ActivityRepository, RoleRepository, SearchAnalyticsRepository, SessionRepository,
};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

/// Outcome of a failed ban. Banning is two-phase (flag the role record, then
/// close active sessions) and the operator needs to know which phase failed,
/// because a failed second phase leaves the flag set.
#[derive(Debug, thiserror::Error)]
pub enum BanError {
    #[error("user has no role record")]
    UnknownUser,

    #[error("failed to update role record: {0}")]
    RoleUpdate(#[source] sqlx::Error),

    #[error("banned flag set, but closing active sessions failed: {0}")]
    SessionClose(#[source] sqlx::Error),
}

/// Administration service over the roles and sessions collections.
#[derive(Clone)]
pub struct UserAdministration {
    roles: RoleRepository,
    sessions: SessionRepository,
    activity: ActivityRepository,
    searches: SearchAnalyticsRepository,
}

impl UserAdministration {
    pub fn new(pool: PgPool) -> Self {
        Self {
            roles: RoleRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool.clone()),
            activity: ActivityRepository::new(pool.clone()),
            searches: SearchAnalyticsRepository::new(pool),
        }
    }

    /// Ban a user. Phase 1 sets the banned flag, phase 2 closes every active
    /// session. When phase 2 fails the flag stays set; there is no rollback.
    /// Returns the number of sessions closed.
    pub async fn ban_user(&self, user_id: Uuid) -> Result<u64, BanError> {
        let updated = self
            .roles
            .set_banned(user_id, true)
            .await
            .map_err(BanError::RoleUpdate)?;
        if updated == 0 {
            return Err(BanError::UnknownUser);
        }

        let closed = self
            .sessions
            .end_all_active_for_user(user_id)
            .await
            .map_err(BanError::SessionClose)?;

        info!(user_id = %user_id, sessions_closed = closed, "User banned");
        Ok(closed)
    }

    /// Clear the banned flag. Previously closed sessions stay closed.
    pub async fn unban_user(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let updated = self.roles.set_banned(user_id, false).await?;
        if updated > 0 {
            info!(user_id = %user_id, "User unbanned");
        }
        Ok(updated)
    }

    /// Record a freshly created user in the roles collection. The remote
    /// collaborator only creates the account; the role row lives in this
    /// store and must be written here, otherwise the user is invisible to
    /// every administration operation.
    pub async fn register_created_user(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<RoleRecord, sqlx::Error> {
        let record = self.roles.upsert(user_id, role).await?;
        info!(user_id = %user_id, role = %role, "User registered in roles collection");
        Ok(record)
    }

    /// Reassign a user's role. Returns the number of rows matched.
    pub async fn change_user_role(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<u64, sqlx::Error> {
        let updated = self.roles.set_role(user_id, role).await?;
        if updated > 0 {
            info!(user_id = %user_id, role = %role, "User role changed");
        }
        Ok(updated)
    }

    /// Every known user's role record.
    pub async fn list_users(&self) -> Result<Vec<RoleRecord>, sqlx::Error> {
        self.roles.list().await
    }

    /// One user's role record with on-demand statistics. `stats: None` means
    /// the statistics fetch failed, not that the user was inactive.
    pub async fn get_user_with_stats(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserWithStats>, sqlx::Error> {
        let Some(role) = self.roles.find_by_user(user_id).await? else {
            return Ok(None);
        };

        let stats = self.fetch_stats(user_id).await;
        Ok(Some(UserWithStats { role, stats }))
    }

    async fn fetch_stats(&self, user_id: Uuid) -> Option<UserStats> {
        let sessions = self.sessions.list_for_user(user_id).await;
        let activities = self.activity.list_for_user(user_id).await;
        let searches = self.searches.list_for_user(user_id).await;

        match (sessions, activities, searches) {
            (Ok(sessions), Ok(activities), Ok(searches)) => {
                Some(compute_user_stats(&sessions, &activities, &searches))
            }
            (sessions, activities, searches) => {
                warn!(
                    user_id = %user_id,
                    sessions_ok = sessions.is_ok(),
                    activities_ok = activities.is_ok(),
                    searches_ok = searches.is_ok(),
                    "User statistics unavailable"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ban_error_messages_name_the_phase() {
        let role_phase = BanError::RoleUpdate(sqlx::Error::PoolClosed);
        assert!(role_phase.to_string().contains("role record"));

        let session_phase = BanError::SessionClose(sqlx::Error::PoolClosed);
        assert!(session_phase.to_string().contains("banned flag set"));
    }

    #[test]
    fn test_unknown_user_error() {
        assert_eq!(BanError::UnknownUser.to_string(), "user has no role record");
    }
}
