//! Derived admin analytics report models.

use serde::Serialize;
use std::collections::HashMap;

/// Rankings returned to the admin console are capped at this many entries.
pub const TOP_N: usize = 10;

/// One ranked key with its frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCount {
    pub label: String,
    pub count: u64,
}

/// One ranked `(error code, system)` pair with its frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchedCodeCount {
    pub code: String,
    pub system: String,
    pub count: u64,
}

/// Global KPIs over the filtered snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total_events: u64,
    pub total_searches: u64,
    pub total_clicks: u64,
    pub total_page_views: u64,
    /// Distinct non-empty `user_id` values.
    pub unique_users: u64,
    /// Distinct non-empty `device_id` values.
    pub unique_devices: u64,
}

/// Complete analytics summary for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub event_type_counts: HashMap<String, u64>,
    pub top_clicked_elements: Vec<RankedCount>,
    pub top_pages: Vec<RankedCount>,
    pub top_searched_codes: Vec<SearchedCodeCount>,
    pub kpis: Kpis,
}
