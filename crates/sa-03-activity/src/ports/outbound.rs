//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::Activity;
use shared_types::{ActivityId, StoreError, UserId};
use std::collections::HashSet;

/// Storage of activities.
pub trait ActivityStore: Send + Sync {
    fn insert(&self, activity: Activity) -> Result<(), StoreError>;

    fn get(&self, activity_id: ActivityId) -> Result<Option<Activity>, StoreError>;

    /// Every activity starting at or after `from`, soonest first.
    fn upcoming(&self, from: chrono::DateTime<chrono::Utc>) -> Result<Vec<Activity>, StoreError>;
}

/// Per-user block lists.
pub trait BlockList: Send + Sync {
    /// Returns false if already blocked.
    fn block(&self, user: UserId, blocked: UserId) -> Result<bool, StoreError>;

    fn blocked_by(&self, user: UserId) -> Result<HashSet<UserId>, StoreError>;
}
