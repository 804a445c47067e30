//! Session entity.

use chrono::{DateTime, Utc};
use domain::models::{DeviceInfo, Session};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the `sessions` collection.
#[derive(Debug, Clone, FromRow)]
pub struct SessionEntity {
    /// Unique identifier.
    pub id: Uuid,

    /// Owning user; null for anonymous sessions.
    pub user_id: Option<Uuid>,

    /// When the session opened.
    pub session_start: DateTime<Utc>,

    /// When the session ended; null while active.
    pub session_end: Option<DateTime<Utc>>,

    /// Device fingerprint blob captured at open time.
    pub device_info: Option<serde_json::Value>,

    /// Client IP address, when known.
    pub ip_address: Option<String>,
}

impl From<SessionEntity> for Session {
    fn from(entity: SessionEntity) -> Self {
        let device_info: Option<DeviceInfo> = entity
            .device_info
            .and_then(|json| serde_json::from_value(json).ok());

        Session {
            id: entity.id,
            user_id: entity.user_id,
            session_start: entity.session_start,
            session_end: entity.session_end,
            device_info,
            ip_address: entity.ip_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_to_domain_parses_device_info() {
        let entity = SessionEntity {
            id: Uuid::new_v4(),
            user_id: None,
            session_start: Utc::now(),
            session_end: None,
            device_info: Some(serde_json::json!({
                "userAgent": "Mozilla/5.0",
                "language": "en-US",
                "platform": "Linux x86_64",
                "screenResolution": "1920x1080"
            })),
            ip_address: Some("10.0.0.7".to_string()),
        };

        let session: Session = entity.into();
        assert!(session.is_active());
        assert_eq!(
            session.device_info.unwrap().screen_resolution,
            "1920x1080"
        );
    }

    #[test]
    fn test_entity_to_domain_tolerates_malformed_blob() {
        let entity = SessionEntity {
            id: Uuid::new_v4(),
            user_id: None,
            session_start: Utc::now(),
            session_end: None,
            device_info: Some(serde_json::json!("not an object")),
            ip_address: None,
        };

        let session: Session = entity.into();
        assert!(session.device_info.is_none());
    }
}
