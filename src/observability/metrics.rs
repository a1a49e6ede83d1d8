//! Metrics collection.
//!
//! # Metrics
//! - `weth_wrapper_calls_total` (counter): public operations by `op`, `outcome`
//! - `weth_wrapper_init_total` (counter): initialization attempts by `outcome`
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the embedding application
//!   installs whatever exporter it uses

use crate::blockchain::types::WethResult;

pub const CALLS_TOTAL: &str = "weth_wrapper_calls_total";
pub const INIT_TOTAL: &str = "weth_wrapper_init_total";

fn outcome<T>(result: &WethResult<T>) -> &'static str {
    if result.is_ok() {
        "ok"
    } else {
        "error"
    }
}

/// Count one public operation.
pub fn record_call<T>(op: &'static str, result: &WethResult<T>) {
    ::metrics::counter!(CALLS_TOTAL, "op" => op, "outcome" => outcome(result)).increment(1);
}

/// Count one initialization attempt.
pub fn record_init<T>(result: &WethResult<T>) {
    ::metrics::counter!(INIT_TOTAL, "outcome" => outcome(result)).increment(1);
}
