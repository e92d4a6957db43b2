//! Error types for the query bridge.
//!
//! Only entity lookups surface an error to the caller. Every other query kind
//! degrades to its fallback value.

use shared_bus::QueryKind;
use shared_types::{ResponderError, UserId};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Why a single bridge call produced no payload.
///
/// Never returned by a typed façade: each façade turns it into its
/// fallback value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// No response arrived within the window.
    #[error("{kind} query timed out after {}ms", timeout.as_millis())]
    Timeout { kind: QueryKind, timeout: Duration },

    /// The query event reached no subscriber.
    #[error("{kind} query reached no subscriber")]
    NoSubscribers { kind: QueryKind },

    /// The event factory produced an event that cannot be correlated.
    #[error("{kind} query factory produced a {actual} event")]
    MalformedQuery { kind: QueryKind, actual: QueryKind },

    /// The pending entry vanished without a response.
    #[error("{kind} query was released before a response arrived")]
    Released { kind: QueryKind },
}

impl BridgeError {
    /// The query kind the failed call belonged to.
    #[must_use]
    pub fn kind(&self) -> QueryKind {
        match self {
            Self::Timeout { kind, .. }
            | Self::NoSubscribers { kind }
            | Self::MalformedQuery { kind, .. }
            | Self::Released { kind } => *kind,
        }
    }

    /// Whether this is a plain timeout rather than a dispatch problem.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Why an entity lookup produced a not-found condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The owning module answered that the entity does not exist.
    Missing,
    /// No answer arrived within the query timeout.
    NoResponse,
    /// The query could not be dispatched.
    DispatchFailed,
    /// The owning module answered with an error.
    ResponderFailed(ResponderError),
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("does not exist"),
            Self::NoResponse => f.write_str("no response before timeout"),
            Self::DispatchFailed => f.write_str("query could not be dispatched"),
            Self::ResponderFailed(err) => write!(f, "responder failed: {err}"),
        }
    }
}

/// A required entity could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("user {user_id} not found ({reason})")]
pub struct EntityNotFound {
    /// The user that was asked for.
    pub user_id: UserId,
    /// What went wrong.
    pub reason: NotFoundReason,
}

impl EntityNotFound {
    /// The owning module confirmed the entity does not exist.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.reason == NotFoundReason::Missing
    }

    /// The owning module did not answer in time.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.reason == NotFoundReason::NoResponse
    }
}

impl From<&BridgeError> for NotFoundReason {
    fn from(err: &BridgeError) -> Self {
        if err.is_timeout() {
            Self::NoResponse
        } else {
            Self::DispatchFailed
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A zero timeout would fail every query.
    #[error("query timeout must be greater than zero")]
    ZeroTimeout,

    /// No query could ever be dispatched.
    #[error("max in-flight queries must be greater than zero")]
    ZeroInFlight,

    /// Queries and their responses could overrun the bus and be skipped.
    #[error("{max_in_flight} in-flight queries need a bus capacity of at least {required}, got {capacity}")]
    InFlightExceedsBus {
        max_in_flight: usize,
        required: usize,
        capacity: usize,
    },
}
