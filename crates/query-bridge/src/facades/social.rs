//! Relationship queries against the Social module.
//!
//! Reads fail closed: an unknown relationship is reported as absent.

use super::settle;
use crate::bridge::QueryBridge;
use crate::reply::QueryReply;
use shared_bus::{QueryKind, SocialEvent};
use shared_types::UserId;

/// Queries answered by the Social module.
#[derive(Clone)]
pub struct SocialQueries {
    bridge: QueryBridge,
}

impl SocialQueries {
    pub fn new(bridge: QueryBridge) -> Self {
        Self { bridge }
    }

    /// Whether two users are friends. `false` when unanswered.
    pub async fn are_friends(&self, user_id: UserId, other_id: UserId) -> bool {
        let kind = QueryKind::AreFriends;
        let key = format!("{user_id}/{other_id}");

        let outcome = self
            .bridge
            .issue_query(kind, &key, |request_id| SocialEvent::AreFriends {
                request_id,
                user_id,
                other_id,
            })
            .await;

        settle(kind, &key, outcome, |reply| match reply {
            QueryReply::AreFriends(answer) => Some(answer),
            _ => None,
        })
        .unwrap_or(false)
    }

    /// Number of friends two users share. `0` when unanswered.
    pub async fn count_mutual_friends(&self, user_id: UserId, other_id: UserId) -> u64 {
        let kind = QueryKind::CountMutualFriends;
        let key = format!("{user_id}/{other_id}");

        let outcome = self
            .bridge
            .issue_query(kind, &key, |request_id| SocialEvent::CountMutualFriends {
                request_id,
                user_id,
                other_id,
            })
            .await;

        settle(kind, &key, outcome, |reply| match reply {
            QueryReply::MutualFriends(answer) => Some(answer),
            _ => None,
        })
        .unwrap_or(0)
    }

    /// Ask the Social module to record a friendship.
    ///
    /// Returns whether the friendship is known to exist afterwards. `false`
    /// means "not confirmed saved", never an error.
    pub async fn save_friendship(&self, user_id: UserId, friend_id: UserId) -> bool {
        let kind = QueryKind::SaveFriendship;
        let key = format!("{user_id}/{friend_id}");

        let outcome = self
            .bridge
            .issue_query(kind, &key, |request_id| SocialEvent::SaveFriendship {
                request_id,
                user_id,
                friend_id,
            })
            .await;

        settle(kind, &key, outcome, |reply| match reply {
            QueryReply::FriendshipSaved(answer) => Some(answer),
            _ => None,
        })
        .unwrap_or(false)
    }
}
