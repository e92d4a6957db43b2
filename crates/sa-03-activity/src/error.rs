//! Error types for the Activity module

use query_bridge::EntityNotFound;
use shared_types::{ActivityId, StoreError, UserId};
use thiserror::Error;

/// Activity module errors
#[derive(Debug, Error)]
pub enum ActivityError {
    /// No activity with this id
    #[error("Activity not found: {0}")]
    NotFound(ActivityId),

    /// Viewer may not see this activity
    #[error("Activity {activity_id} is not visible to user {viewer}")]
    NotVisible { activity_id: ActivityId, viewer: UserId },

    /// Title fails validation
    #[error("Invalid title: {0}")]
    InvalidTitle(&'static str),

    /// The host could not be confirmed by the User module
    #[error("Activity host unavailable: {0}")]
    HostUnavailable(#[source] EntityNotFound),

    /// A user cannot block themselves
    #[error("User {0} cannot block themselves")]
    SelfBlock(UserId),

    /// Backing store failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for activity operations
pub type ActivityResult<T> = Result<T, ActivityError>;
