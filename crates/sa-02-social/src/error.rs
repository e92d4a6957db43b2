//! Error types for the Social module

use shared_types::{StoreError, UserId};
use thiserror::Error;

/// Social module errors
#[derive(Debug, Error)]
pub enum SocialError {
    /// A user cannot befriend themselves
    #[error("User {0} cannot befriend themselves")]
    SelfFriendship(UserId),

    /// Backing store failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for social operations
pub type SocialResult<T> = Result<T, SocialError>;
