//! # Runtime Configuration
//!
//! Every setting has a default and an environment override. Settings under
//! which no query could succeed are rejected before anything starts.

use query_bridge::BridgeConfig;
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use social_telemetry::TelemetryConfig;
use std::env;
use thiserror::Error;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Query bridge configuration.
    pub bridge: BridgeConfig,
    /// Event bus configuration.
    pub bus: BusConfig,
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
}

impl RuntimeConfig {
    /// Load every section from the environment.
    pub fn from_env() -> Self {
        Self {
            bridge: BridgeConfig::from_env(),
            bus: BusConfig::from_env(),
            telemetry: TelemetryConfig::from_env(),
        }
    }

    /// Validate configuration before startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus.channel_capacity == 0 {
            return Err(ConfigError::ZeroBusCapacity);
        }
        self.bridge.validate_for_bus(self.bus.channel_capacity)?;
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    Bridge(#[from] query_bridge::ConfigError),

    #[error("SA_BUS_CAPACITY must be greater than zero")]
    ZeroBusCapacity,
}

/// Event bus configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusConfig {
    /// Events buffered per subscriber before the slowest one lags.
    pub channel_capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl BusConfig {
    /// - `SA_BUS_CAPACITY`: channel capacity (default: 1000)
    pub fn from_env() -> Self {
        let channel_capacity = env::var("SA_BUS_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CHANNEL_CAPACITY);
        Self { channel_capacity }
    }
}
