//! Daily log retention purge.

use persistence::repositories::LogRepository;
use sqlx::PgPool;
use tracing::info;

use super::scheduler::{Job, JobInterval};

/// Removes application log entries older than the retention window.
pub struct PurgeLogsJob {
    repo: LogRepository,
    retention_days: u32,
}

impl PurgeLogsJob {
    pub fn new(pool: PgPool, retention_days: u32) -> Self {
        Self {
            repo: LogRepository::new(pool),
            retention_days,
        }
    }
}

#[async_trait::async_trait]
impl Job for PurgeLogsJob {
    fn name(&self) -> &'static str {
        "purge_logs"
    }

    fn interval(&self) -> JobInterval {
        JobInterval::Daily
    }

    async fn execute(&self) -> Result<(), String> {
        let deleted = self
            .repo
            .purge_older_than(self.retention_days as i32)
            .await
            .map_err(|e| format!("Failed to purge old logs: {}", e))?;

        info!(
            deleted = deleted,
            retention_days = self.retention_days,
            "Purged old application logs"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_runs_daily() {
        let interval = JobInterval::Daily;
        assert_eq!(interval.duration(), std::time::Duration::from_secs(86400));
    }
}
