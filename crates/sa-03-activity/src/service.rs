//! # Activity Service
//!
//! Implements [`ActivityApi`]. Every fact about users, friendships and chat
//! is fetched through the query bridge and degrades the way the bridge
//! façades document; only a missing host stops an operation.

use crate::domain::{Activity, ActivityDetail, FeedEntry, NewActivity};
use crate::error::{ActivityError, ActivityResult};
use crate::ports::inbound::ActivityApi;
use crate::ports::outbound::{ActivityStore, BlockList};
use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use query_bridge::{ChatMessageHydrator, ChatQueries, SocialQueries, UserQueries};
use shared_types::{distinct_ids, exclude_by_id, ActivityId, ChatMessageView, Identified, UserId};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Cross-module queries the Activity module issues.
#[derive(Clone)]
pub struct ActivityQueries {
    pub users: UserQueries,
    pub social: SocialQueries,
    pub chat: ChatQueries,
    pub hydrator: ChatMessageHydrator,
}

/// Activity module service.
pub struct ActivityService {
    store: Arc<dyn ActivityStore>,
    blocks: Arc<dyn BlockList>,
    queries: ActivityQueries,
}

impl ActivityService {
    pub fn new(
        store: Arc<dyn ActivityStore>,
        blocks: Arc<dyn BlockList>,
        queries: ActivityQueries,
    ) -> Self {
        Self {
            store,
            blocks,
            queries,
        }
    }

    async fn can_view(&self, viewer: UserId, activity: &Activity) -> bool {
        activity.openly_visible_to(viewer)
            || self.queries.social.are_friends(viewer, activity.host_id).await
    }

    /// Drop messages from blocked senders and likes from blocked users.
    fn hide_blocked(messages: Vec<ChatMessageView>, blocked: &HashSet<UserId>) -> Vec<ChatMessageView> {
        if blocked.is_empty() {
            return messages;
        }
        messages
            .into_iter()
            .filter(|message| !blocked.contains(&message.sender.id()))
            .map(|mut message| {
                message.liked_by = exclude_by_id(message.liked_by, blocked);
                message
            })
            .collect()
    }
}

#[async_trait]
impl ActivityApi for ActivityService {
    async fn create_activity(&self, input: NewActivity) -> ActivityResult<Activity> {
        let activity = Activity::create(input).map_err(ActivityError::InvalidTitle)?;
        self.queries
            .users
            .get_user(activity.host_id)
            .await
            .map_err(ActivityError::HostUnavailable)?;

        self.store.insert(activity.clone())?;
        info!(
            activity_id = %activity.id,
            host_id = %activity.host_id,
            visibility = ?activity.visibility,
            "[sa-03] Activity created"
        );
        Ok(activity)
    }

    async fn activity_detail(
        &self,
        viewer: UserId,
        activity_id: ActivityId,
    ) -> ActivityResult<ActivityDetail> {
        let activity = self
            .store
            .get(activity_id)?
            .ok_or(ActivityError::NotFound(activity_id))?;

        if !self.can_view(viewer, &activity).await {
            return Err(ActivityError::NotVisible {
                activity_id,
                viewer,
            });
        }

        let (host, messages) = tokio::join!(
            self.queries.users.get_user(activity.host_id),
            self.queries.hydrator.hydrate_activity_messages(activity_id),
        );
        let host = host.map_err(ActivityError::HostUnavailable)?;
        let blocked = self.blocks.blocked_by(viewer)?;

        Ok(ActivityDetail {
            messages: Self::hide_blocked(messages, &blocked),
            activity,
            host,
        })
    }

    async fn feed(&self, viewer: UserId) -> ActivityResult<Vec<FeedEntry>> {
        let upcoming = self.store.upcoming(Utc::now())?;

        // One friendship check per distinct host, all at once
        let hosts = distinct_ids(
            upcoming
                .iter()
                .filter(|a| !a.openly_visible_to(viewer))
                .map(|a| a.host_id),
        );
        let checks = join_all(
            hosts
                .iter()
                .map(|host| self.queries.social.are_friends(viewer, *host)),
        )
        .await;
        let friend_hosts: HashSet<UserId> = hosts
            .into_iter()
            .zip(checks)
            .filter_map(|(host, is_friend)| is_friend.then_some(host))
            .collect();

        let visible: Vec<Activity> = upcoming
            .into_iter()
            .filter(|a| a.openly_visible_to(viewer) || friend_hosts.contains(&a.host_id))
            .collect();
        let ids: Vec<ActivityId> = visible.iter().map(Identified::id).collect();
        let counts = self.queries.chat.message_ids_batch(&ids).await;

        debug!(viewer = %viewer, activities = visible.len(), "Feed assembled");
        Ok(visible
            .into_iter()
            .map(|activity| FeedEntry {
                message_count: counts.get(&activity.id).map_or(0, Vec::len),
                activity,
            })
            .collect())
    }

    async fn block_user(&self, user: UserId, blocked: UserId) -> ActivityResult<bool> {
        if user == blocked {
            return Err(ActivityError::SelfBlock(user));
        }
        Ok(self.blocks.block(user, blocked)?)
    }
}
