//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::SaveOutcome;
use shared_types::{StoreError, UserId};

/// Storage of friendships.
pub trait FriendshipStore: Send + Sync {
    fn are_friends(&self, a: UserId, b: UserId) -> Result<bool, StoreError>;

    fn mutual_friend_count(&self, a: UserId, b: UserId) -> Result<u64, StoreError>;

    /// Record a friendship. Saving an existing friendship is not an error.
    fn save_friendship(&self, a: UserId, b: UserId) -> Result<SaveOutcome, StoreError>;

    /// Remove a friendship. Returns whether it existed.
    fn remove_friendship(&self, a: UserId, b: UserId) -> Result<bool, StoreError>;

    fn friends_of(&self, a: UserId) -> Result<Vec<UserId>, StoreError>;

    /// Friend-of-friend candidates with their mutual friend counts.
    fn suggestions(&self, a: UserId) -> Result<Vec<(UserId, u64)>, StoreError>;
}
