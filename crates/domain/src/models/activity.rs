//! Activity event domain models.
//!
//! Activity events are immutable, timestamped records of user actions.
//! The stream is append-only; there is no update or delete path in normal
//! operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Event type for route changes.
pub const PAGE_VIEW: &str = "page_view";
/// Event type for clicks on interactive elements.
pub const ELEMENT_CLICK: &str = "element_click";
/// Event type for error-code searches, mirrored into the activity stream.
pub const ERROR_CODE_SEARCH: &str = "error_code_search";
/// Legacy click event type still present in stored rows; the admin report
/// ranks these by `meta.buttonLabel`.
pub const BUTTON_CLICK: &str = "button_click";

/// Maximum length of a click label before truncation.
pub const MAX_LABEL_LEN: usize = 100;

/// Activity event domain model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    /// Client-supplied device fingerprint id, used by the unique-devices KPI.
    pub device_id: Option<String>,
    pub activity_type: String,
    pub path: Option<String>,
    pub meta: Option<JsonValue>,
    pub timestamp: DateTime<Utc>,
}

/// Input for appending one activity event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivityEvent {
    pub activity_type: String,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub meta: Option<JsonValue>,
}

impl NewActivityEvent {
    pub fn new(activity_type: impl Into<String>) -> Self {
        Self {
            activity_type: activity_type.into(),
            user_id: None,
            device_id: None,
            path: None,
            meta: None,
        }
    }

    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_meta(mut self, meta: JsonValue) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Truncate a human-readable click label to at most [`MAX_LABEL_LEN`]
/// characters, respecting char boundaries.
pub fn truncate_label(label: &str) -> String {
    label.trim().chars().take(MAX_LABEL_LEN).collect()
}
