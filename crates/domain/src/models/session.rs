//! Session domain models.
//!
//! A session is a bounded interval of user/device presence. `session_end`
//! is null while the session is active; once set, the session is terminal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Device fingerprint captured when a session opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub user_agent: String,
    pub language: String,
    pub platform: String,
    /// Formatted as `<width>x<height>`, e.g. `1920x1080`.
    pub screen_resolution: String,
}

/// Session domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub session_start: DateTime<Utc>,
    pub session_end: Option<DateTime<Utc>>,
    pub device_info: Option<DeviceInfo>,
    pub ip_address: Option<String>,
}

impl Session {
    /// Whether the session is still open.
    pub fn is_active(&self) -> bool {
        self.session_end.is_none()
    }
}

/// Input for opening a new session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub device_info: Option<DeviceInfo>,
    #[serde(default)]
    pub ip_address: Option<String>,
}
