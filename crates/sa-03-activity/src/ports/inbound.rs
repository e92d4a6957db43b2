//! Driving Ports (API - Inbound)

use crate::domain::{Activity, ActivityDetail, FeedEntry, NewActivity};
use crate::error::ActivityResult;
use async_trait::async_trait;
use shared_types::{ActivityId, UserId};

/// Primary Activity API
#[async_trait]
pub trait ActivityApi: Send + Sync {
    /// Create an activity. The host must be a known user.
    async fn create_activity(&self, input: NewActivity) -> ActivityResult<Activity>;

    /// Activity page as `viewer` sees it.
    async fn activity_detail(
        &self,
        viewer: UserId,
        activity_id: ActivityId,
    ) -> ActivityResult<ActivityDetail>;

    /// Activities `viewer` may see, soonest first, with message counts.
    async fn feed(&self, viewer: UserId) -> ActivityResult<Vec<FeedEntry>>;

    /// Hide `blocked`'s chat messages from `user`.
    async fn block_user(&self, user: UserId, blocked: UserId) -> ActivityResult<bool>;
}
