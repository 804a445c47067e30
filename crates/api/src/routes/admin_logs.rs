//! Admin log triage routes: listing, plain-text export, and retention purge.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use domain::models::{to_plain_text, LevelFilter};
use persistence::repositories::LogRepository;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;

/// Severity filter query. Absent or `All` means no filter.
#[derive(Debug, Deserialize)]
pub struct LogListQuery {
    pub level: Option<String>,
}

/// Query parameters for the retention purge.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PurgeLogsQuery {
    pub older_than_days: i32,
    /// The purge is irreversible; it runs only with `confirm=true`.
    #[serde(default)]
    pub confirm: bool,
}

/// Response for the purge operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PurgeLogsResponse {
    pub success: bool,
    pub affected_count: u64,
    pub message: String,
}

fn parse_filter(query: &LogListQuery) -> Result<LevelFilter, ApiError> {
    match query.level.as_deref() {
        None => Ok(LevelFilter::All),
        Some(raw) => raw
            .parse::<LevelFilter>()
            .map_err(ApiError::Validation),
    }
}

/// GET /api/admin/v1/logs
///
/// Entries newest first, optionally restricted to one severity.
pub async fn list_logs(
    State(state): State<AppState>,
    Query(query): Query<LogListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = parse_filter(&query)?;
    let repo = LogRepository::new(state.pool.clone());
    let entries = repo.list(filter.level()).await?;
    Ok(Json(entries))
}

/// GET /api/admin/v1/logs/export
///
/// Renders the filtered entries in the plain-text export format consumed by
/// the admin console's copy and download actions.
pub async fn export_logs(
    State(state): State<AppState>,
    Query(query): Query<LogListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = parse_filter(&query)?;
    let repo = LogRepository::new(state.pool.clone());
    let entries = repo.list(filter.level()).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        to_plain_text(&entries),
    ))
}

/// DELETE /api/admin/v1/logs
pub async fn purge_logs(
    State(state): State<AppState>,
    Query(query): Query<PurgeLogsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if !query.confirm {
        return Err(ApiError::Validation(
            "Purging logs requires confirm=true".to_string(),
        ));
    }

    if query.older_than_days < 1 {
        return Err(ApiError::Validation(
            "older_than_days must be at least 1".to_string(),
        ));
    }

    let repo = LogRepository::new(state.pool.clone());
    let deleted = repo.purge_older_than(query.older_than_days).await?;

    info!(
        older_than_days = query.older_than_days,
        deleted = deleted,
        "Admin purged application logs"
    );

    Ok((
        StatusCode::OK,
        Json(PurgeLogsResponse {
            success: true,
            affected_count: deleted,
            message: format!(
                "Deleted {} log entries older than {} days",
                deleted, query.older_than_days
            ),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::LogLevel;

    #[test]
    fn test_parse_filter_absent_means_all() {
        let filter = parse_filter(&LogListQuery { level: None }).unwrap();
        assert_eq!(filter, LevelFilter::All);
    }

    #[test]
    fn test_parse_filter_named_level() {
        let filter = parse_filter(&LogListQuery {
            level: Some("Shutdown".to_string()),
        })
        .unwrap();
        assert_eq!(filter, LevelFilter::Level(LogLevel::Shutdown));
    }

    #[test]
    fn test_parse_filter_rejects_unknown_level() {
        let result = parse_filter(&LogListQuery {
            level: Some("Verbose".to_string()),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_purge_query_confirm_defaults_to_false() {
        let query: PurgeLogsQuery =
            serde_json::from_str(r#"{"older_than_days": 30}"#).unwrap();
        assert!(!query.confirm);
    }
}
