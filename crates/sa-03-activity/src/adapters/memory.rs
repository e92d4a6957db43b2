//! In-memory activity store and block list.

use crate::domain::Activity;
use crate::ports::outbound::{ActivityStore, BlockList};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use shared_types::{ActivityId, StoreError, UserId};
use std::collections::{HashMap, HashSet};

/// Activity store held in process memory.
#[derive(Default)]
pub struct InMemoryActivityStore {
    activities: RwLock<HashMap<ActivityId, Activity>>,
}

impl InMemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ActivityStore for InMemoryActivityStore {
    fn insert(&self, activity: Activity) -> Result<(), StoreError> {
        self.activities.write().insert(activity.id, activity);
        Ok(())
    }

    fn get(&self, activity_id: ActivityId) -> Result<Option<Activity>, StoreError> {
        Ok(self.activities.read().get(&activity_id).cloned())
    }

    fn upcoming(&self, from: DateTime<Utc>) -> Result<Vec<Activity>, StoreError> {
        let mut upcoming: Vec<Activity> = self
            .activities
            .read()
            .values()
            .filter(|a| a.starts_at >= from)
            .cloned()
            .collect();
        upcoming.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then(a.id.cmp(&b.id)));
        Ok(upcoming)
    }
}

/// Block lists held in process memory.
#[derive(Default)]
pub struct InMemoryBlockList {
    blocks: RwLock<HashMap<UserId, HashSet<UserId>>>,
}

impl InMemoryBlockList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlockList for InMemoryBlockList {
    fn block(&self, user: UserId, blocked: UserId) -> Result<bool, StoreError> {
        Ok(self.blocks.write().entry(user).or_default().insert(blocked))
    }

    fn blocked_by(&self, user: UserId) -> Result<HashSet<UserId>, StoreError> {
        Ok(self.blocks.read().get(&user).cloned().unwrap_or_default())
    }
}
