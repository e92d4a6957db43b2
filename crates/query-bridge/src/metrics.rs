//! # Query Bridge Metrics
//!
//! Prometheus metrics for cross-module query traffic.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! query-bridge = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `query_bridge_queries_issued_total{kind}` - Queries published
//! - `query_bridge_timeouts_total{kind}` - Queries that fell back after the timeout
//! - `query_bridge_dispatch_failures_total{kind}` - Queries that could not be published
//! - `query_bridge_responses_discarded_total` - Late, duplicate or unknown responses
//! - `query_bridge_hydration_drops_total{item}` - Items dropped while hydrating
//! - `query_bridge_in_flight` - Queries currently waiting for a response

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, register_int_gauge};
#[cfg(feature = "metrics")]
use prometheus::{IntCounter, IntCounterVec, IntGauge};

use shared_bus::QueryKind;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Queries published, labeled by kind
    pub static ref QUERIES_ISSUED: IntCounterVec = register_int_counter_vec!(
        "query_bridge_queries_issued_total",
        "Total number of cross-module queries published",
        &["kind"]
    )
    .expect("Failed to create QUERIES_ISSUED metric");

    /// Queries that timed out, labeled by kind
    pub static ref QUERY_TIMEOUTS: IntCounterVec = register_int_counter_vec!(
        "query_bridge_timeouts_total",
        "Total number of cross-module queries that timed out",
        &["kind"]
    )
    .expect("Failed to create QUERY_TIMEOUTS metric");

    /// Queries that could not be dispatched, labeled by kind
    pub static ref DISPATCH_FAILURES: IntCounterVec = register_int_counter_vec!(
        "query_bridge_dispatch_failures_total",
        "Total number of cross-module queries that could not be published",
        &["kind"]
    )
    .expect("Failed to create DISPATCH_FAILURES metric");

    /// Responses with no waiting caller
    pub static ref RESPONSES_DISCARDED: IntCounter = register_int_counter!(
        "query_bridge_responses_discarded_total",
        "Total number of responses discarded because no caller was waiting"
    )
    .expect("Failed to create RESPONSES_DISCARDED metric");

    /// Items dropped during hydration, labeled by item type
    pub static ref HYDRATION_DROPS: IntCounterVec = register_int_counter_vec!(
        "query_bridge_hydration_drops_total",
        "Total number of items dropped while hydrating composite results",
        &["item"]
    )
    .expect("Failed to create HYDRATION_DROPS metric");

    /// Queries waiting for a response
    pub static ref IN_FLIGHT: IntGauge = register_int_gauge!(
        "query_bridge_in_flight",
        "Number of cross-module queries currently waiting for a response"
    )
    .expect("Failed to create IN_FLIGHT metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a query published
#[cfg(feature = "metrics")]
pub fn record_query_issued(kind: QueryKind) {
    QUERIES_ISSUED.with_label_values(&[kind.as_str()]).inc();
}

/// Record a query timeout
#[cfg(feature = "metrics")]
pub fn record_timeout(kind: QueryKind) {
    QUERY_TIMEOUTS.with_label_values(&[kind.as_str()]).inc();
}

/// Record a query that could not be published
#[cfg(feature = "metrics")]
pub fn record_dispatch_failure(kind: QueryKind) {
    DISPATCH_FAILURES.with_label_values(&[kind.as_str()]).inc();
}

/// Record a discarded response
#[cfg(feature = "metrics")]
pub fn record_response_discarded() {
    RESPONSES_DISCARDED.inc();
}

/// Record an item dropped during hydration
#[cfg(feature = "metrics")]
pub fn record_hydration_drop(item: &str) {
    HYDRATION_DROPS.with_label_values(&[item]).inc();
}

/// Update the in-flight gauge
#[cfg(feature = "metrics")]
pub fn set_in_flight(count: usize) {
    IN_FLIGHT.set(i64::try_from(count).unwrap_or(i64::MAX));
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_query_issued(_kind: QueryKind) {}

#[cfg(not(feature = "metrics"))]
pub fn record_timeout(_kind: QueryKind) {}

#[cfg(not(feature = "metrics"))]
pub fn record_dispatch_failure(_kind: QueryKind) {}

#[cfg(not(feature = "metrics"))]
pub fn record_response_discarded() {}

#[cfg(not(feature = "metrics"))]
pub fn record_hydration_drop(_item: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn set_in_flight(_count: usize) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_never_panics() {
        record_query_issued(QueryKind::GetUser);
        record_timeout(QueryKind::AreFriends);
        record_dispatch_failure(QueryKind::GetMessageIds);
        record_response_discarded();
        record_hydration_drop("message");
        set_in_flight(3);
    }
}
