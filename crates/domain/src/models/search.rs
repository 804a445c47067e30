//! Search analytics domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded error-code search. Immutable, append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAnalyticsEntry {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub system_name: String,
    pub error_code: String,
    pub timestamp: DateTime<Utc>,
}

/// Input for recording one search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSearchEntry {
    pub system_name: String,
    pub error_code: String,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub device_id: Option<String>,
}
