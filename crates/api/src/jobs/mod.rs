//! Background jobs.

pub mod purge_logs;
pub mod scheduler;

pub use purge_logs::PurgeLogsJob;
pub use scheduler::{Job, JobInterval, JobScheduler};
