//! # Social Telemetry
//!
//! Logging setup and metrics export for the social-activity backend.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use social_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SA_SERVICE_NAME` | `social-activity` | Service name in the startup log |
//! | `SA_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `SA_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::export_metrics;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Failed to install log subscriber: {0}")]
    SubscriberInit(String),

    #[error("Failed to encode metrics: {0}")]
    MetricsExport(String),
}
