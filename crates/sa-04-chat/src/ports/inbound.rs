//! Driving Ports (API - Inbound)

use crate::error::ChatResult;
use async_trait::async_trait;
use shared_types::{ActivityId, ChatMessageRecord, ChatMessageView, MessageId, UserId};

/// Primary Chat API
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Post a message to an activity's chat. The sender must be a known user.
    async fn post_message(
        &self,
        activity_id: ActivityId,
        sender_id: UserId,
        content: &str,
    ) -> ChatResult<ChatMessageRecord>;

    /// Like a message. Returns false if the user already liked it.
    async fn like_message(&self, message_id: MessageId, user_id: UserId) -> ChatResult<bool>;

    /// Withdraw a like. Returns whether there was one.
    async fn unlike_message(&self, message_id: MessageId, user_id: UserId) -> ChatResult<bool>;

    /// Display-ready messages of an activity, oldest first.
    async fn room_messages(&self, activity_id: ActivityId) -> ChatResult<Vec<ChatMessageView>>;
}
