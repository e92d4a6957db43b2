//! # Chat Rooms
//!
//! A room is the ordered message log of one activity.

use chrono::{DateTime, Utc};
use shared_types::{ActivityId, ChatMessageRecord, MessageId, UserId};

/// Longest accepted message body, in characters.
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Trim a message body and check its length.
pub fn validate_content(content: &str) -> Result<&str, (usize, usize)> {
    let trimmed = content.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > MAX_MESSAGE_LEN {
        return Err((len, MAX_MESSAGE_LEN));
    }
    Ok(trimmed)
}

/// Messages of one activity, oldest first.
#[derive(Debug, Clone)]
pub struct ChatRoom {
    pub activity_id: ActivityId,
    messages: Vec<ChatMessageRecord>,
}

impl ChatRoom {
    pub fn new(activity_id: ActivityId) -> Self {
        Self {
            activity_id,
            messages: Vec::new(),
        }
    }

    /// Append a message. Keeps the log ordered by `sent_at`.
    pub fn post(&mut self, sender_id: UserId, content: String, sent_at: DateTime<Utc>) -> &ChatMessageRecord {
        let record = ChatMessageRecord {
            id: MessageId::new(),
            activity_id: self.activity_id,
            sender_id,
            content,
            sent_at,
            liked_by: Vec::new(),
        };
        let at = self.messages.partition_point(|m| m.sent_at <= sent_at);
        self.messages.insert(at, record);
        &self.messages[at]
    }

    /// Add a like. Returns false if the user already liked the message,
    /// `None` if the message is not in this room.
    pub fn like(&mut self, message_id: MessageId, user_id: UserId) -> Option<bool> {
        let message = self.messages.iter_mut().find(|m| m.id == message_id)?;
        if message.liked_by.contains(&user_id) {
            return Some(false);
        }
        message.liked_by.push(user_id);
        Some(true)
    }

    /// Remove a like. Returns whether there was one.
    pub fn unlike(&mut self, message_id: MessageId, user_id: UserId) -> Option<bool> {
        let message = self.messages.iter_mut().find(|m| m.id == message_id)?;
        let before = message.liked_by.len();
        message.liked_by.retain(|id| *id != user_id);
        Some(message.liked_by.len() != before)
    }

    pub fn messages(&self) -> &[ChatMessageRecord] {
        &self.messages
    }

    pub fn message_ids(&self) -> Vec<MessageId> {
        self.messages.iter().map(|m| m.id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
