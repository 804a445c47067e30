//! HTTP middleware.

pub mod logging;
pub mod trace_id;

pub use trace_id::{trace_id, RequestId, REQUEST_ID_HEADER};
