//! Telemetry recorders.
//!
//! Recording is advisory: a failed write must never break the caller's
//! primary flow. Every recorder returns an explicit [`RecordingFailure`] the
//! caller is free to discard, and the `_detached` variants spawn the write
//! and log failures at debug.

use domain::models::{
    truncate_label, ActivityEvent, LogEntry, NewActivityEvent, NewLogEntry, NewSearchEntry,
    ELEMENT_CLICK, ERROR_CODE_SEARCH,
};
use persistence::repositories::{ActivityRepository, LogRepository, SearchAnalyticsRepository};
use serde_json::json;
use sqlx::PgPool;
use tracing::debug;

/// A telemetry write that did not reach the store.
#[derive(Debug, thiserror::Error)]
#[error("telemetry write failed: {0}")]
pub struct RecordingFailure(#[from] sqlx::Error);

/// Records activity events, searches, and application logs.
#[derive(Clone)]
pub struct ActivityRecorder {
    activity: ActivityRepository,
    searches: SearchAnalyticsRepository,
    logs: LogRepository,
}

impl ActivityRecorder {
    pub fn new(pool: PgPool) -> Self {
        Self {
            activity: ActivityRepository::new(pool.clone()),
            searches: SearchAnalyticsRepository::new(pool.clone()),
            logs: LogRepository::new(pool),
        }
    }

    /// Append one activity event. Click labels are truncated here as well,
    /// in case a client skipped its own truncation.
    pub async fn record(
        &self,
        mut input: NewActivityEvent,
    ) -> Result<ActivityEvent, RecordingFailure> {
        if input.activity_type == ELEMENT_CLICK {
            if let Some(meta) = input.meta.as_mut() {
                if let Some(label) = meta.get("buttonLabel").and_then(|v| v.as_str()) {
                    let truncated = truncate_label(label);
                    meta["buttonLabel"] = json!(truncated);
                }
            }
        }

        Ok(self.activity.insert(&input).await?)
    }

    /// Spawn the write and drop the handle. Failures are logged at debug.
    pub fn record_detached(&self, input: NewActivityEvent) {
        let recorder = self.clone();
        tokio::spawn(async move {
            let activity_type = input.activity_type.clone();
            if let Err(e) = recorder.record(input).await {
                debug!(activity_type = %activity_type, error = %e, "Dropped activity event");
            }
        });
    }

    /// Record one error-code search: a `search_analytics` row plus a mirrored
    /// activity event. The two writes are independent; either may fail
    /// without rolling back the other.
    pub async fn record_search(&self, input: NewSearchEntry) {
        if let Err(e) = self.searches.insert(&input).await {
            debug!(error = %e, "Dropped search analytics entry");
        }

        let mut event = NewActivityEvent::new(ERROR_CODE_SEARCH).with_meta(json!({
            "errorCode": input.error_code,
            "systemName": input.system_name,
        }));
        event.user_id = input.user_id;
        event.device_id = input.device_id;

        if let Err(e) = self.activity.insert(&event).await {
            debug!(error = %e, "Dropped search activity event");
        }
    }

    /// Spawn both search writes and drop the handle.
    pub fn record_search_detached(&self, input: NewSearchEntry) {
        let recorder = self.clone();
        tokio::spawn(async move {
            recorder.record_search(input).await;
        });
    }

    /// Append one application log entry.
    pub async fn append_log(&self, input: NewLogEntry) -> Result<LogEntry, RecordingFailure> {
        Ok(self.logs.insert(&input).await?)
    }

    /// Spawn the log write and drop the handle.
    pub fn append_log_detached(&self, input: NewLogEntry) {
        let recorder = self.clone();
        tokio::spawn(async move {
            if let Err(e) = recorder.append_log(input).await {
                debug!(error = %e, "Dropped log entry");
            }
        });
    }
}
