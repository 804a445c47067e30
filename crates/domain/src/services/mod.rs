//! Pure aggregation services.
//!
//! Both services are side-effect-free computations over already-fetched
//! snapshots; they perform no I/O and are safe to call concurrently.

pub mod report;
pub mod stats;

pub use report::build_summary;
pub use stats::compute_user_stats;
