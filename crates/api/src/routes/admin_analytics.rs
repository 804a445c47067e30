//! Admin analytics route.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use domain::services::build_summary;
use persistence::repositories::ActivityRepository;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;

/// Query parameters for the analytics summary. Both bounds are inclusive and
/// either may be omitted.
#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// GET /api/admin/v1/analytics
///
/// Recomputes the full summary from the activity snapshot on every call.
pub async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err(ApiError::Validation(
                "'from' must not be after 'to'".to_string(),
            ));
        }
    }

    let repo = ActivityRepository::new(state.pool.clone());
    let events = repo.list_range(query.from, query.to).await?;

    Ok(Json(build_summary(&events)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analytics_query_open_ended() {
        let query: AnalyticsQuery = serde_json::from_str("{}").unwrap();
        assert!(query.from.is_none());
        assert!(query.to.is_none());
    }

    #[test]
    fn test_analytics_query_parses_timestamps() {
        let query: AnalyticsQuery = serde_json::from_str(
            r#"{"from": "2024-03-01T00:00:00Z", "to": "2024-03-31T23:59:59Z"}"#,
        )
        .unwrap();
        assert!(query.from.unwrap() < query.to.unwrap());
    }
}
