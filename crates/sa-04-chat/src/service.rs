//! # Chat Service
//!
//! Implements [`ChatApi`]. Acting users are confirmed with the User module
//! before anything is written; reading a room hydrates its messages into
//! display cards.

use crate::domain::validate_content;
use crate::error::{ChatError, ChatResult};
use crate::ports::inbound::ChatApi;
use crate::ports::outbound::ChatStore;
use async_trait::async_trait;
use chrono::Utc;
use query_bridge::{ChatMessageHydrator, UserQueries};
use shared_types::{ActivityId, ChatMessageRecord, ChatMessageView, MessageId, StoreError, UserId};
use std::sync::Arc;
use tracing::{debug, info};

/// Chat module service.
pub struct ChatService {
    store: Arc<dyn ChatStore>,
    users: UserQueries,
    hydrator: ChatMessageHydrator,
}

impl ChatService {
    pub fn new(store: Arc<dyn ChatStore>, users: UserQueries, hydrator: ChatMessageHydrator) -> Self {
        Self {
            store,
            users,
            hydrator,
        }
    }

    async fn confirm_user(&self, user_id: UserId) -> ChatResult<()> {
        self.users
            .get_user(user_id)
            .await
            .map(|_| ())
            .map_err(ChatError::UnknownUser)
    }
}

fn message_error(message_id: MessageId, err: StoreError) -> ChatError {
    match err {
        StoreError::NotFound { .. } => ChatError::MessageNotFound(message_id),
        other => ChatError::Store(other),
    }
}

#[async_trait]
impl ChatApi for ChatService {
    async fn post_message(
        &self,
        activity_id: ActivityId,
        sender_id: UserId,
        content: &str,
    ) -> ChatResult<ChatMessageRecord> {
        let content = validate_content(content).map_err(|(len, max)| {
            if len == 0 {
                ChatError::EmptyMessage
            } else {
                ChatError::MessageTooLong { len, max }
            }
        })?;
        self.confirm_user(sender_id).await?;

        let record = self
            .store
            .append(activity_id, sender_id, content.to_string(), Utc::now())?;
        info!(
            message_id = %record.id,
            activity_id = %activity_id,
            sender_id = %sender_id,
            "[sa-04] Message posted"
        );
        Ok(record)
    }

    async fn like_message(&self, message_id: MessageId, user_id: UserId) -> ChatResult<bool> {
        self.confirm_user(user_id).await?;
        let liked = self
            .store
            .like(message_id, user_id)
            .map_err(|err| message_error(message_id, err))?;
        debug!(message_id = %message_id, user_id = %user_id, liked, "Like recorded");
        Ok(liked)
    }

    async fn unlike_message(&self, message_id: MessageId, user_id: UserId) -> ChatResult<bool> {
        self.store
            .unlike(message_id, user_id)
            .map_err(|err| message_error(message_id, err))
    }

    async fn room_messages(&self, activity_id: ActivityId) -> ChatResult<Vec<ChatMessageView>> {
        let records = self.store.messages(activity_id)?;
        Ok(self.hydrator.hydrate(records).await)
    }
}
