//! Bridge configuration.

use crate::error::ConfigError;
use std::env;
use std::time::Duration;

/// Default wait for any cross-module query, in milliseconds.
///
/// Uniform across query kinds: a boolean check and a batch fetch get the
/// same window.
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5000;

/// Default cap on queries published and not yet settled.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 256;

/// Bus events one query can occupy: the query and its response.
const EVENTS_PER_QUERY: usize = 2;

/// Query bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// How long a caller waits for a response before taking the fallback.
    pub query_timeout: Duration,
    /// Queries on the bus at once. Further callers wait for a slot inside
    /// their own window.
    pub max_in_flight: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            query_timeout: Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

impl BridgeConfig {
    /// Create configuration with an explicit timeout.
    #[must_use]
    pub fn with_timeout(query_timeout: Duration) -> Self {
        Self {
            query_timeout,
            ..Self::default()
        }
    }

    /// Set the in-flight cap.
    #[must_use]
    pub fn max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    /// Create configuration from environment variables.
    ///
    /// - `SA_QUERY_TIMEOUT_MS`: query timeout (default: 5000)
    /// - `SA_MAX_IN_FLIGHT`: queries on the bus at once (default: 256)
    ///
    /// Unparseable values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        let query_timeout = env::var("SA_QUERY_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS));

        let max_in_flight = env::var("SA_MAX_IN_FLIGHT")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_IN_FLIGHT);

        Self {
            query_timeout,
            max_in_flight,
        }
    }

    /// Reject configurations under which no query could ever succeed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::ZeroInFlight);
        }
        Ok(())
    }

    /// Like [`validate`](Self::validate), and also check that every
    /// in-flight query and its response fit on a bus of `capacity` events.
    ///
    /// A bus that overflows makes slow subscribers skip events, which
    /// turns answered queries into timeouts.
    pub fn validate_for_bus(&self, capacity: usize) -> Result<(), ConfigError> {
        self.validate()?;
        let required = self.max_in_flight.saturating_mul(EVENTS_PER_QUERY);
        if required > capacity {
            return Err(ConfigError::InFlightExceedsBus {
                max_in_flight: self.max_in_flight,
                required,
                capacity,
            });
        }
        Ok(())
    }
}
