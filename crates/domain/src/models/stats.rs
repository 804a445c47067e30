//! Derived per-user statistics.
//!
//! These are computed on demand from a fetched snapshot and never stored;
//! every report request recomputes them from scratch.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One ranked error code with its search count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchedCode {
    pub code: String,
    pub count: u64,
}

/// Per-user behavior profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Number of completed sessions (non-null `session_end`).
    pub login_count: u64,
    /// `session_start` of the most recent session, active or not.
    pub last_login: Option<DateTime<Utc>>,
    pub most_viewed_page: Option<String>,
    /// Top 5 searched error codes, descending by count.
    pub most_searched_codes: Vec<SearchedCode>,
    pub total_activity_count: u64,
}
