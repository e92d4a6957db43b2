//! # Error Types
//!
//! Errors that travel between modules or are shared by every module's store.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by a responding module inside a response event.
///
/// The caller never sees this as an error: the façade logs it and falls back.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("responder error {code}: {message}")]
pub struct ResponderError {
    /// Machine-readable code, one of the constants below.
    pub code: i32,
    /// Human-readable reason.
    pub message: String,
}

impl ResponderError {
    /// The responder's store failed.
    pub const STORE_FAILURE: i32 = -32000;
    /// The query arguments were rejected.
    pub const INVALID_ARGUMENT: i32 = -32602;

    /// Build an error from a store failure.
    #[must_use]
    pub fn store(err: &StoreError) -> Self {
        Self {
            code: Self::STORE_FAILURE,
            message: err.to_string(),
        }
    }

    /// Build an error for rejected arguments.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            code: Self::INVALID_ARGUMENT,
            message: message.into(),
        }
    }
}

/// Errors from a module's backing store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The operation is not allowed for these arguments.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The store is unavailable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
