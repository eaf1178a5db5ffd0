//! Metrics collection.
//!
//! # Metrics
//! - `push_attempts_total` (counter): push attempts by phase
//!   (`configured` | `link`)
//! - `push_failures_total` (counter): failed push attempts by phase
//!
//! # Design Decisions
//! - Emitted through the `metrics` facade; the embedding application
//!   decides on an exporter
//! - A failed push counts as both an attempt and a failure

use metrics::counter;

/// Record one push attempt in the given phase.
pub fn record_push_attempt(phase: &'static str) {
    counter!("push_attempts_total", "phase" => phase).increment(1);
}

/// Record one failed push attempt in the given phase.
pub fn record_push_failure(phase: &'static str) {
    counter!("push_failures_total", "phase" => phase).increment(1);
}
