//! Error types for the Chat module

use query_bridge::EntityNotFound;
use shared_types::{MessageId, StoreError};
use thiserror::Error;

/// Chat module errors
#[derive(Debug, Error)]
pub enum ChatError {
    /// Message body is blank
    #[error("Message is empty")]
    EmptyMessage,

    /// Message body exceeds the limit
    #[error("Message too long: {len} characters, limit {max}")]
    MessageTooLong { len: usize, max: usize },

    /// No message with this id
    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),

    /// The acting user could not be confirmed by the User module
    #[error("Unknown user: {0}")]
    UnknownUser(#[source] EntityNotFound),

    /// Backing store failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for chat operations
pub type ChatResult<T> = Result<T, ChatError>;
