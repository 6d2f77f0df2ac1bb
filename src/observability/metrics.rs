//! Metrics collection.
//!
//! # Metrics
//! - `console_navigations_total` (counter): navigations by outcome
//! - `console_rpc_calls_total` (counter): admin API calls by method, result
//!
//! # Design Decisions
//! - Uses the `metrics` facade; without an installed recorder the calls are no-ops
//! - Labels are low-cardinality: never the location or domain name

/// Record the outcome of one navigation.
pub fn record_navigation(outcome: &'static str) {
    ::metrics::counter!("console_navigations_total", "outcome" => outcome).increment(1);
}

/// Record one admin API call.
pub fn record_rpc_call(method: &'static str, ok: bool) {
    let result = if ok { "ok" } else { "error" };
    ::metrics::counter!("console_rpc_calls_total", "method" => method, "result" => result)
        .increment(1);
}
