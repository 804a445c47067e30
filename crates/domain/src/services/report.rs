//! Admin analytics report builder.
//!
//! Pure function over a global activity-event snapshot, optionally
//! pre-filtered to a date range by the caller's fetch. Rankings and KPIs are
//! recomputed from scratch on every invocation; there is no incremental
//! update path.

use crate::models::activity::{ActivityEvent, BUTTON_CLICK, ERROR_CODE_SEARCH, PAGE_VIEW};
use crate::models::report::{AnalyticsSummary, Kpis, RankedCount, SearchedCodeCount, TOP_N};
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet};

/// Build the admin analytics summary from an event snapshot.
pub fn build_summary(events: &[ActivityEvent]) -> AnalyticsSummary {
    let mut event_type_counts: HashMap<String, u64> = HashMap::new();
    let mut clicks = FrequencyMap::new();
    let mut pages = FrequencyMap::new();
    let mut codes = FrequencyMap::new();

    for event in events {
        *event_type_counts
            .entry(event.activity_type.clone())
            .or_insert(0) += 1;

        match event.activity_type.as_str() {
            BUTTON_CLICK => {
                clicks.add(meta_str(&event.meta, "buttonLabel").to_string());
            }
            PAGE_VIEW => {
                pages.add(event.path.clone().unwrap_or_else(|| "/".to_string()));
            }
            ERROR_CODE_SEARCH => {
                let code = meta_str(&event.meta, "errorCode").to_string();
                let system = meta_str(&event.meta, "systemName").to_string();
                codes.add((code, system));
            }
            _ => {}
        }
    }

    let top_searched_codes = codes
        .ranked()
        .into_iter()
        .take(TOP_N)
        .map(|((code, system), count)| SearchedCodeCount {
            code,
            system,
            count,
        })
        .collect();

    AnalyticsSummary {
        event_type_counts,
        top_clicked_elements: ranked_counts(clicks),
        top_pages: ranked_counts(pages),
        top_searched_codes,
        kpis: compute_kpis(events),
    }
}

fn compute_kpis(events: &[ActivityEvent]) -> Kpis {
    let count_type = |t: &str| events.iter().filter(|e| e.activity_type == t).count() as u64;

    let unique_users: HashSet<_> = events.iter().filter_map(|e| e.user_id).collect();
    let unique_devices: HashSet<_> = events
        .iter()
        .filter_map(|e| e.device_id.as_deref())
        .filter(|d| !d.is_empty())
        .collect();

    Kpis {
        total_events: events.len() as u64,
        total_searches: count_type(ERROR_CODE_SEARCH),
        total_clicks: count_type(BUTTON_CLICK),
        total_page_views: count_type(PAGE_VIEW),
        unique_users: unique_users.len() as u64,
        unique_devices: unique_devices.len() as u64,
    }
}

fn ranked_counts(map: FrequencyMap<String>) -> Vec<RankedCount> {
    map.ranked()
        .into_iter()
        .take(TOP_N)
        .map(|(label, count)| RankedCount { label, count })
        .collect()
}

fn meta_str<'a>(meta: &'a Option<JsonValue>, key: &str) -> &'a str {
    meta.as_ref()
        .and_then(|m| m.get(key))
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
}

/// Frequency accumulator preserving first-encounter order so that ties rank
/// deterministically for a given snapshot order. Keyed generically so the
/// searched-code ranking can count `(code, system)` pairs without encoding
/// them into a delimited string.
struct FrequencyMap<K> {
    order: Vec<(K, u64)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + std::hash::Hash + Clone> FrequencyMap<K> {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn add(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&i) => self.order[i].1 += 1,
            None => {
                self.index.insert(key.clone(), self.order.len());
                self.order.push((key, 1));
            }
        }
    }

    /// Entries sorted descending by count; stable, so ties keep encounter
    /// order.
    fn ranked(self) -> Vec<(K, u64)> {
        let mut order = self.order;
        order.sort_by(|a, b| b.1.cmp(&a.1));
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn event(activity_type: &str) -> ActivityEvent {
        ActivityEvent {
            id: Uuid::new_v4(),
            user_id: None,
            device_id: None,
            activity_type: activity_type.to_string(),
            path: None,
            meta: None,
            timestamp: Utc::now(),
        }
    }

    fn click(label: Option<&str>) -> ActivityEvent {
        let mut e = event(BUTTON_CLICK);
        e.meta = label.map(|l| json!({ "buttonLabel": l }));
        e
    }

    fn page(path: Option<&str>) -> ActivityEvent {
        let mut e = event(PAGE_VIEW);
        e.path = path.map(String::from);
        e
    }

    fn code_search(code: &str, system: &str) -> ActivityEvent {
        let mut e = event(ERROR_CODE_SEARCH);
        e.meta = Some(json!({ "errorCode": code, "systemName": system }));
        e
    }

    #[test]
    fn test_event_type_counts() {
        let events = vec![page(Some("/")), page(Some("/")), click(Some("Start"))];
        let summary = build_summary(&events);
        assert_eq!(summary.event_type_counts["page_view"], 2);
        assert_eq!(summary.event_type_counts["button_click"], 1);
    }

    #[test]
    fn test_top_clicked_elements_defaults_to_unknown() {
        let events = vec![click(Some("Start")), click(None), click(None)];
        let summary = build_summary(&events);
        assert_eq!(summary.top_clicked_elements[0].label, "unknown");
        assert_eq!(summary.top_clicked_elements[0].count, 2);
        assert_eq!(summary.top_clicked_elements[1].label, "Start");
    }

    #[test]
    fn test_top_pages_defaults_to_root() {
        let events = vec![page(None), page(None), page(Some("/diagnose"))];
        let summary = build_summary(&events);
        assert_eq!(summary.top_pages[0].label, "/");
        assert_eq!(summary.top_pages[0].count, 2);
    }

    #[test]
    fn test_top_searched_codes_composite_key() {
        let events = vec![
            code_search("E1", "Heat Pump"),
            code_search("E1", "Heat Pump"),
            code_search("E1", "Boiler"),
        ];
        let summary = build_summary(&events);
        assert_eq!(summary.top_searched_codes.len(), 2);
        assert_eq!(summary.top_searched_codes[0].code, "E1");
        assert_eq!(summary.top_searched_codes[0].system, "Heat Pump");
        assert_eq!(summary.top_searched_codes[0].count, 2);
        assert_eq!(summary.top_searched_codes[1].system, "Boiler");
    }

    #[test]
    fn test_searched_codes_with_colons_do_not_collide() {
        // "A:B" on system "S" and "A" on system "B:S" are different searches
        // even though a naive string join would render both as "A:B:S".
        let events = vec![
            code_search("A:B", "S"),
            code_search("A:B", "S"),
            code_search("A", "B:S"),
        ];
        let summary = build_summary(&events);
        assert_eq!(summary.top_searched_codes.len(), 2);
        assert_eq!(summary.top_searched_codes[0].code, "A:B");
        assert_eq!(summary.top_searched_codes[0].system, "S");
        assert_eq!(summary.top_searched_codes[0].count, 2);
        assert_eq!(summary.top_searched_codes[1].code, "A");
        assert_eq!(summary.top_searched_codes[1].system, "B:S");
        assert_eq!(summary.top_searched_codes[1].count, 1);
    }

    #[test]
    fn test_search_without_meta_defaults_to_unknown() {
        let summary = build_summary(&[event(ERROR_CODE_SEARCH)]);
        assert_eq!(summary.top_searched_codes[0].code, "unknown");
        assert_eq!(summary.top_searched_codes[0].system, "unknown");
    }

    #[test]
    fn test_rankings_capped_at_ten_and_descending() {
        let mut events = Vec::new();
        for i in 0..15 {
            // Page "/p0" appears 15 times, "/p1" 14 times, ...
            for _ in i..15 {
                events.push(page(Some(&format!("/p{}", i))));
            }
        }
        let summary = build_summary(&events);
        assert_eq!(summary.top_pages.len(), TOP_N);
        for pair in summary.top_pages.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
        assert_eq!(summary.top_pages[0].label, "/p0");
        assert_eq!(summary.top_pages[0].count, 15);
    }

    #[test]
    fn test_kpi_unique_users_ignores_duplicates() {
        let (u1, u2) = (Uuid::new_v4(), Uuid::new_v4());
        let mut events: Vec<ActivityEvent> = (0..5).map(|_| page(Some("/"))).collect();
        events[0].user_id = Some(u1);
        events[1].user_id = Some(u1);
        events[2].user_id = Some(u1);
        events[3].user_id = Some(u2);
        events[4].user_id = Some(u2);
        let summary = build_summary(&events);
        assert_eq!(summary.kpis.unique_users, 2);
        assert_eq!(summary.kpis.total_events, 5);
    }

    #[test]
    fn test_kpi_unique_devices_skips_empty() {
        let mut events: Vec<ActivityEvent> = (0..4).map(|_| page(Some("/"))).collect();
        events[0].device_id = Some("dev-a".to_string());
        events[1].device_id = Some("dev-a".to_string());
        events[2].device_id = Some(String::new());
        let summary = build_summary(&events);
        assert_eq!(summary.kpis.unique_devices, 1);
    }

    #[test]
    fn test_kpi_type_counts() {
        let events = vec![
            page(Some("/")),
            click(Some("Go")),
            code_search("E1", "Sys"),
            code_search("E2", "Sys"),
        ];
        let kpis = build_summary(&events).kpis;
        assert_eq!(kpis.total_page_views, 1);
        assert_eq!(kpis.total_clicks, 1);
        assert_eq!(kpis.total_searches, 2);
        assert_eq!(kpis.total_events, 4);
    }

    #[test]
    fn test_empty_snapshot() {
        let summary = build_summary(&[]);
        assert!(summary.event_type_counts.is_empty());
        assert!(summary.top_pages.is_empty());
        assert_eq!(summary.kpis, Kpis::default());
    }
}
