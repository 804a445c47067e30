//! User role and administration domain models.

use crate::models::stats::UserStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// User role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Moderator,
    #[default]
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Moderator => "moderator",
            UserRole::User => "user",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "moderator" => Ok(UserRole::Moderator),
            "user" => Ok(UserRole::User),
            _ => Err(format!("Unknown user role: {}", s)),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role record from the `roles` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: UserRole,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
}

/// Request to create a user via the function-invocation collaborator.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[serde(default)]
    pub role: UserRole,
}

/// User payload returned by the `create-user` function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedUser {
    pub id: Uuid,
    pub email: String,
}

/// Role record combined with on-demand statistics. `stats` is `None` when the
/// statistics fetch failed, which means "unavailable" rather than "empty".
#[derive(Debug, Clone, Serialize)]
pub struct UserWithStats {
    #[serde(flatten)]
    pub role: RoleRecord,
    pub stats: Option<UserStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Admin, UserRole::Moderator, UserRole::User] {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        let role: UserRole = serde_json::from_str("\"moderator\"").unwrap();
        assert_eq!(role, UserRole::Moderator);
    }

    #[test]
    fn test_create_user_request_validation() {
        let valid = CreateUserRequest {
            email: "tech@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
            full_name: "Field Tech".to_string(),
            role: UserRole::User,
        };
        assert!(valid.validate().is_ok());

        let invalid = CreateUserRequest {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            full_name: String::new(),
            role: UserRole::User,
        };
        let errors = invalid.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
        assert!(errors.field_errors().contains_key("full_name"));
    }
}
