//! Prometheus text export.
//!
//! Crates register their metrics with the default registry (see the
//! `metrics` feature of `query-bridge`); this renders all of them.

use crate::TelemetryError;
use prometheus::{Encoder, TextEncoder};

/// Render every metric in the default registry in the Prometheus text format.
pub fn export_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsExport(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsExport(e.to_string()))
}
