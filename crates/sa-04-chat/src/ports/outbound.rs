//! Driven Ports (SPI - Outbound Dependencies)

use chrono::{DateTime, Utc};
use shared_types::{ActivityId, ChatMessageRecord, MessageId, StoreError, UserId};
use std::collections::HashMap;

/// Storage of chat messages.
pub trait ChatStore: Send + Sync {
    /// Ids of an activity's messages, oldest first.
    fn message_ids(&self, activity_id: ActivityId) -> Result<Vec<MessageId>, StoreError>;

    /// Ids for many activities. Activities without messages are absent.
    fn message_ids_batch(
        &self,
        activity_ids: &[ActivityId],
    ) -> Result<HashMap<ActivityId, Vec<MessageId>>, StoreError>;

    /// Full records of an activity's messages, oldest first.
    fn messages(&self, activity_id: ActivityId) -> Result<Vec<ChatMessageRecord>, StoreError>;

    /// Append a message to an activity's room, creating the room if needed.
    fn append(
        &self,
        activity_id: ActivityId,
        sender_id: UserId,
        content: String,
        sent_at: DateTime<Utc>,
    ) -> Result<ChatMessageRecord, StoreError>;

    /// Returns false if already liked.
    fn like(&self, message_id: MessageId, user_id: UserId) -> Result<bool, StoreError>;

    /// Returns whether a like was removed.
    fn unlike(&self, message_id: MessageId, user_id: UserId) -> Result<bool, StoreError>;
}
