//! Driving Ports (API - Inbound)

use crate::domain::SaveOutcome;
use crate::error::SocialResult;
use async_trait::async_trait;
use shared_types::{UserId, UserSnapshot};

/// A suggested friend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendSuggestion {
    pub user: UserSnapshot,
    /// Friends shared with the user the suggestion is for.
    pub mutual_friends: u64,
}

/// Primary Social API
#[async_trait]
pub trait SocialApi: Send + Sync {
    /// Record a friendship. Idempotent.
    async fn befriend(&self, user_id: UserId, friend_id: UserId) -> SocialResult<SaveOutcome>;

    /// Remove a friendship. Returns whether it existed.
    async fn unfriend(&self, user_id: UserId, friend_id: UserId) -> SocialResult<bool>;

    /// Friends of a user as display snapshots.
    ///
    /// Friends the User module cannot resolve are left out.
    async fn friend_list(&self, user_id: UserId) -> SocialResult<Vec<UserSnapshot>>;

    /// Up to `limit` friends of friends, most mutual friends first.
    async fn suggest_friends(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> SocialResult<Vec<FriendSuggestion>>;
}
