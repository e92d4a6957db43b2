//! Error types for the User module

use shared_types::{StoreError, UserId};
use thiserror::Error;

/// User module errors
#[derive(Debug, Error)]
pub enum UserError {
    /// No user with this id
    #[error("User not found: {0}")]
    NotFound(UserId),

    /// Username fails validation
    #[error("Invalid username {username:?}: {reason}")]
    InvalidUsername { username: String, reason: &'static str },

    /// Username already registered
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// A user cannot befriend themselves
    #[error("User {0} cannot befriend themselves")]
    SelfFriendship(UserId),

    /// Backing store failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for user operations
pub type UsersResult<T> = Result<T, UserError>;
