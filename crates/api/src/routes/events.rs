//! Telemetry recording routes: activity events, error-code searches, and
//! application logs.
//!
//! All three answer `202 Accepted` immediately; the writes happen on
//! detached tasks and failures are logged at debug. A recording route never
//! answers 5xx for a store error.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::{NewActivityEvent, NewLogEntry, NewSearchEntry};

use crate::app::AppState;
use crate::services::ActivityRecorder;

/// POST /api/v1/events
pub async fn record_event(
    State(state): State<AppState>,
    Json(input): Json<NewActivityEvent>,
) -> StatusCode {
    ActivityRecorder::new(state.pool.clone()).record_detached(input);
    StatusCode::ACCEPTED
}

/// POST /api/v1/searches
///
/// Writes one search-analytics row and mirrors an `error_code_search`
/// activity event. The two writes are independent.
pub async fn record_search(
    State(state): State<AppState>,
    Json(input): Json<NewSearchEntry>,
) -> StatusCode {
    ActivityRecorder::new(state.pool.clone()).record_search_detached(input);
    StatusCode::ACCEPTED
}

/// POST /api/v1/logs
pub async fn record_log(
    State(state): State<AppState>,
    Json(input): Json<NewLogEntry>,
) -> StatusCode {
    ActivityRecorder::new(state.pool.clone()).append_log_detached(input);
    StatusCode::ACCEPTED
}
