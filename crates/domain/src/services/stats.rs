//! Per-user statistics aggregation.
//!
//! Pure function over three fetched snapshots (sessions, activity events,
//! search-analytics entries) filtered to one user. Nothing here is persisted;
//! the caller owns the result and recomputes it on every request.

use crate::models::activity::{ActivityEvent, PAGE_VIEW};
use crate::models::search::SearchAnalyticsEntry;
use crate::models::session::Session;
use crate::models::stats::{SearchedCode, UserStats};
use std::collections::HashMap;

/// How many searched codes a user profile reports.
const TOP_CODES: usize = 5;

/// Compute a user's behavior profile from snapshots of their sessions,
/// activity events, and search entries.
///
/// Ties in `most_viewed_page` and `most_searched_codes` resolve to the
/// first-encountered key in the snapshot: counts accumulate in encounter
/// order and the descending sort is stable.
pub fn compute_user_stats(
    sessions: &[Session],
    activities: &[ActivityEvent],
    searches: &[SearchAnalyticsEntry],
) -> UserStats {
    // Logins are completed sessions only; last_login also counts an active one.
    let login_count = sessions.iter().filter(|s| s.session_end.is_some()).count() as u64;
    let last_login = sessions.iter().map(|s| s.session_start).max();

    let page_views = frequency(
        activities
            .iter()
            .filter(|a| a.activity_type == PAGE_VIEW)
            .map(|a| a.path.clone().unwrap_or_else(|| "unknown".to_string())),
    );
    let most_viewed_page = page_views.first().map(|(path, _)| path.clone());

    let most_searched_codes = frequency(searches.iter().map(|s| s.error_code.clone()))
        .into_iter()
        .take(TOP_CODES)
        .map(|(code, count)| SearchedCode { code, count })
        .collect();

    UserStats {
        login_count,
        last_login,
        most_viewed_page,
        most_searched_codes,
        total_activity_count: activities.len() as u64,
    }
}

/// Count keys preserving first-encounter order, then sort descending by
/// count. The sort is stable, so equal counts keep encounter order.
fn frequency(keys: impl Iterator<Item = String>) -> Vec<(String, u64)> {
    let mut order: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for key in keys {
        match index.get(&key) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(key.clone(), order.len());
                order.push((key, 1));
            }
        }
    }

    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::ELEMENT_CLICK;
    use chrono::{DateTime, Duration, Utc};
    use uuid::Uuid;

    fn session(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Session {
        Session {
            id: Uuid::new_v4(),
            user_id: Some(Uuid::new_v4()),
            session_start: start,
            session_end: end,
            device_info: None,
            ip_address: None,
        }
    }

    fn event(activity_type: &str, path: Option<&str>) -> ActivityEvent {
        ActivityEvent {
            id: Uuid::new_v4(),
            user_id: None,
            device_id: None,
            activity_type: activity_type.to_string(),
            path: path.map(String::from),
            meta: None,
            timestamp: Utc::now(),
        }
    }

    fn search(code: &str, system: &str) -> SearchAnalyticsEntry {
        SearchAnalyticsEntry {
            id: Uuid::new_v4(),
            user_id: None,
            system_name: system.to_string(),
            error_code: code.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_login_count_only_completed_sessions() {
        let now = Utc::now();
        let sessions = vec![
            session(now, None),
            session(now - Duration::hours(1), Some(now)),
            session(now - Duration::hours(2), Some(now)),
        ];
        let stats = compute_user_stats(&sessions, &[], &[]);
        assert_eq!(stats.login_count, 2);
    }

    #[test]
    fn test_last_login_is_most_recent_start_regardless_of_order() {
        let now = Utc::now();
        // Unsorted snapshot: aggregator must not trust fetch order.
        let sessions = vec![
            session(now - Duration::days(3), Some(now)),
            session(now, None),
            session(now - Duration::days(1), Some(now)),
        ];
        let stats = compute_user_stats(&sessions, &[], &[]);
        assert_eq!(stats.last_login, Some(now));
    }

    #[test]
    fn test_last_login_none_without_sessions() {
        let stats = compute_user_stats(&[], &[], &[]);
        assert_eq!(stats.last_login, None);
        assert_eq!(stats.login_count, 0);
    }

    #[test]
    fn test_total_activity_count_and_page_view_share() {
        let activities = vec![
            event(PAGE_VIEW, Some("/a")),
            event(PAGE_VIEW, Some("/a")),
            event(ELEMENT_CLICK, None),
            event(PAGE_VIEW, Some("/b")),
            event("error_code_search", None),
        ];
        let stats = compute_user_stats(&[], &activities, &[]);
        assert_eq!(stats.total_activity_count, 5);
        // Page-view frequencies sum to the number of page_view events.
        let counted = frequency(
            activities
                .iter()
                .filter(|a| a.activity_type == PAGE_VIEW)
                .map(|a| a.path.clone().unwrap_or_else(|| "unknown".to_string())),
        );
        assert_eq!(counted.iter().map(|(_, c)| c).sum::<u64>(), 3);
        assert_eq!(stats.most_viewed_page.as_deref(), Some("/a"));
    }

    #[test]
    fn test_most_viewed_page_missing_path_counts_as_unknown() {
        let activities = vec![
            event(PAGE_VIEW, None),
            event(PAGE_VIEW, None),
            event(PAGE_VIEW, Some("/diagnose")),
        ];
        let stats = compute_user_stats(&[], &activities, &[]);
        assert_eq!(stats.most_viewed_page.as_deref(), Some("unknown"));
    }

    #[test]
    fn test_most_viewed_page_none_without_page_views() {
        let stats = compute_user_stats(&[], &[event(ELEMENT_CLICK, None)], &[]);
        assert_eq!(stats.most_viewed_page, None);
    }

    #[test]
    fn test_most_searched_codes_ranking() {
        let searches = vec![
            search("E1", "SysA"),
            search("E1", "SysA"),
            search("E2", "SysB"),
        ];
        let stats = compute_user_stats(&[], &[], &searches);
        assert_eq!(
            stats.most_searched_codes,
            vec![
                SearchedCode {
                    code: "E1".to_string(),
                    count: 2
                },
                SearchedCode {
                    code: "E2".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_most_searched_codes_tie_keeps_encounter_order() {
        let searches = vec![
            search("E9", "SysA"),
            search("E1", "SysA"),
            search("E1", "SysA"),
            search("E9", "SysA"),
        ];
        let stats = compute_user_stats(&[], &[], &searches);
        let codes: Vec<_> = stats
            .most_searched_codes
            .iter()
            .map(|c| c.code.as_str())
            .collect();
        // Both have count 2; E9 was encountered first.
        assert_eq!(codes, vec!["E9", "E1"]);
    }

    #[test]
    fn test_most_searched_codes_capped_at_five() {
        let searches: Vec<_> = (0..8)
            .map(|i| search(&format!("E{}", i), "Sys"))
            .collect();
        let stats = compute_user_stats(&[], &[], &searches);
        assert_eq!(stats.most_searched_codes.len(), 5);
    }
}
