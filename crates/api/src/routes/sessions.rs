//! Session lifecycle routes.
//!
//! Session tracking is advisory telemetry: a store failure answers
//! `204 No Content` rather than an error, and the client carries on without
//! a session handle.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use domain::models::NewSession;
use persistence::repositories::SessionRepository;
use tracing::debug;
use uuid::Uuid;

use crate::app::AppState;

/// Best-effort client IP from proxy headers.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// POST /api/v1/sessions
///
/// Opens a session and returns it, so the client holds an explicit session
/// handle for the later close call.
pub async fn open_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut input): Json<NewSession>,
) -> Response {
    if input.ip_address.is_none() {
        input.ip_address = client_ip(&headers);
    }

    let repo = SessionRepository::new(state.pool.clone());
    match repo.insert(&input).await {
        Ok(session) => (StatusCode::CREATED, Json(session)).into_response(),
        Err(e) => {
            debug!(error = %e, "Dropped session open");
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

/// POST /api/v1/sessions/:session_id/close
///
/// Always answers 204. Closing an already-closed session just re-stamps the
/// end timestamp.
pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> StatusCode {
    let repo = SessionRepository::new(state.pool.clone());
    if let Err(e) = repo.close(session_id).await {
        debug!(session_id = %session_id, error = %e, "Dropped session close");
    }
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_ip_takes_first_forwarded_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            "203.0.113.7, 10.0.0.1".parse().unwrap(),
        );
        assert_eq!(client_ip(&headers).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_client_ip_missing_header() {
        assert_eq!(client_ip(&HeaderMap::new()), None);
    }

    #[test]
    fn test_client_ip_empty_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "".parse().unwrap());
        assert_eq!(client_ip(&headers), None);
    }
}
