//! In-memory chat store.

use crate::domain::ChatRoom;
use crate::ports::outbound::ChatStore;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use shared_types::{ActivityId, ChatMessageRecord, MessageId, StoreError, UserId};
use std::collections::HashMap;

#[derive(Default)]
struct Inner {
    rooms: HashMap<ActivityId, ChatRoom>,
    /// Which room each message lives in
    index: HashMap<MessageId, ActivityId>,
}

impl Inner {
    fn room_of(&mut self, message_id: MessageId) -> Result<&mut ChatRoom, StoreError> {
        let not_found = || StoreError::NotFound {
            entity: "message",
            id: message_id.to_string(),
        };
        let activity_id = *self.index.get(&message_id).ok_or_else(not_found)?;
        self.rooms.get_mut(&activity_id).ok_or_else(not_found)
    }
}

/// Chat store held in process memory.
#[derive(Default)]
pub struct InMemoryChatStore {
    inner: RwLock<Inner>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChatStore for InMemoryChatStore {
    fn message_ids(&self, activity_id: ActivityId) -> Result<Vec<MessageId>, StoreError> {
        Ok(self
            .inner
            .read()
            .rooms
            .get(&activity_id)
            .map(ChatRoom::message_ids)
            .unwrap_or_default())
    }

    fn message_ids_batch(
        &self,
        activity_ids: &[ActivityId],
    ) -> Result<HashMap<ActivityId, Vec<MessageId>>, StoreError> {
        let inner = self.inner.read();
        Ok(activity_ids
            .iter()
            .filter_map(|id| inner.rooms.get(id))
            .filter(|room| !room.is_empty())
            .map(|room| (room.activity_id, room.message_ids()))
            .collect())
    }

    fn messages(&self, activity_id: ActivityId) -> Result<Vec<ChatMessageRecord>, StoreError> {
        Ok(self
            .inner
            .read()
            .rooms
            .get(&activity_id)
            .map(|room| room.messages().to_vec())
            .unwrap_or_default())
    }

    fn append(
        &self,
        activity_id: ActivityId,
        sender_id: UserId,
        content: String,
        sent_at: DateTime<Utc>,
    ) -> Result<ChatMessageRecord, StoreError> {
        let mut inner = self.inner.write();
        let record = inner
            .rooms
            .entry(activity_id)
            .or_insert_with(|| ChatRoom::new(activity_id))
            .post(sender_id, content, sent_at)
            .clone();
        inner.index.insert(record.id, activity_id);
        Ok(record)
    }

    fn like(&self, message_id: MessageId, user_id: UserId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write();
        let room = inner.room_of(message_id)?;
        room.like(message_id, user_id).ok_or(StoreError::NotFound {
            entity: "message",
            id: message_id.to_string(),
        })
    }

    fn unlike(&self, message_id: MessageId, user_id: UserId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write();
        let room = inner.room_of(message_id)?;
        room.unlike(message_id, user_id).ok_or(StoreError::NotFound {
            entity: "message",
            id: message_id.to_string(),
        })
    }
}
