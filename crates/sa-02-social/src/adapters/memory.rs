//! In-memory friendship store.

use crate::domain::{FriendGraph, SaveOutcome};
use crate::ports::outbound::FriendshipStore;
use parking_lot::RwLock;
use shared_types::{StoreError, UserId};

/// Friendship store held in process memory.
#[derive(Default)]
pub struct InMemoryFriendshipStore {
    graph: RwLock<FriendGraph>,
}

impl InMemoryFriendshipStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FriendshipStore for InMemoryFriendshipStore {
    fn are_friends(&self, a: UserId, b: UserId) -> Result<bool, StoreError> {
        Ok(self.graph.read().are_friends(a, b))
    }

    fn mutual_friend_count(&self, a: UserId, b: UserId) -> Result<u64, StoreError> {
        Ok(self.graph.read().mutual_count(a, b))
    }

    fn save_friendship(&self, a: UserId, b: UserId) -> Result<SaveOutcome, StoreError> {
        self.graph
            .write()
            .add(a, b)
            .ok_or_else(|| StoreError::Rejected(format!("user {a} cannot befriend themselves")))
    }

    fn remove_friendship(&self, a: UserId, b: UserId) -> Result<bool, StoreError> {
        Ok(self.graph.write().remove(a, b))
    }

    fn friends_of(&self, a: UserId) -> Result<Vec<UserId>, StoreError> {
        Ok(self.graph.read().friends_of(a))
    }

    fn suggestions(&self, a: UserId) -> Result<Vec<(UserId, u64)>, StoreError> {
        Ok(self.graph.read().suggestions(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_twice_neither_duplicates_nor_errors() {
        let store = InMemoryFriendshipStore::new();
        let (a, b) = (UserId::new(), UserId::new());

        assert_eq!(store.save_friendship(a, b).unwrap(), SaveOutcome::Created);
        assert_eq!(store.save_friendship(a, b).unwrap(), SaveOutcome::AlreadyFriends);
        assert_eq!(store.friends_of(a).unwrap(), vec![b]);
        assert_eq!(store.friends_of(b).unwrap(), vec![a]);
    }

    #[test]
    fn test_self_friendship_is_rejected() {
        let store = InMemoryFriendshipStore::new();
        let a = UserId::new();
        assert!(matches!(store.save_friendship(a, a), Err(StoreError::Rejected(_))));
    }
}
