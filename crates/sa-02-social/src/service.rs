//! # Social Service
//!
//! Implements [`SocialApi`] on top of a [`FriendshipStore`]. Friend ids are
//! turned into display snapshots with one concurrent `get_user` query each.

use crate::domain::SaveOutcome;
use crate::error::{SocialError, SocialResult};
use crate::ports::inbound::{FriendSuggestion, SocialApi};
use crate::ports::outbound::FriendshipStore;
use async_trait::async_trait;
use futures::future::join_all;
use query_bridge::UserQueries;
use shared_types::{UserId, UserSnapshot};
use std::sync::Arc;
use tracing::{debug, warn};

/// Social module service.
pub struct SocialService {
    store: Arc<dyn FriendshipStore>,
    users: UserQueries,
}

impl SocialService {
    pub fn new(store: Arc<dyn FriendshipStore>, users: UserQueries) -> Self {
        Self { store, users }
    }

    /// Resolve ids concurrently, in order. Failures become `None`.
    async fn resolve(&self, ids: &[UserId]) -> Vec<Option<UserSnapshot>> {
        let lookups = ids.iter().map(|id| self.users.get_user(*id));
        join_all(lookups)
            .await
            .into_iter()
            .map(|result| match result {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(user_id = %err.user_id, reason = %err.reason, "Skipping unresolvable user");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl SocialApi for SocialService {
    async fn befriend(&self, user_id: UserId, friend_id: UserId) -> SocialResult<SaveOutcome> {
        if user_id == friend_id {
            return Err(SocialError::SelfFriendship(user_id));
        }
        Ok(self.store.save_friendship(user_id, friend_id)?)
    }

    async fn unfriend(&self, user_id: UserId, friend_id: UserId) -> SocialResult<bool> {
        Ok(self.store.remove_friendship(user_id, friend_id)?)
    }

    async fn friend_list(&self, user_id: UserId) -> SocialResult<Vec<UserSnapshot>> {
        let friend_ids = self.store.friends_of(user_id)?;
        debug!(user_id = %user_id, friends = friend_ids.len(), "Resolving friend list");

        Ok(self.resolve(&friend_ids).await.into_iter().flatten().collect())
    }

    async fn suggest_friends(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> SocialResult<Vec<FriendSuggestion>> {
        let ranked: Vec<(UserId, u64)> = self
            .store
            .suggestions(user_id)?
            .into_iter()
            .take(limit)
            .collect();
        let ids: Vec<UserId> = ranked.iter().map(|(id, _)| *id).collect();
        let users = self.resolve(&ids).await;

        Ok(ranked
            .into_iter()
            .zip(users)
            .filter_map(|((_, mutual_friends), user)| {
                user.map(|user| FriendSuggestion {
                    user,
                    mutual_friends,
                })
            })
            .collect())
    }
}
