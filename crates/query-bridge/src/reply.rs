//! Response payloads as delivered to a waiting caller.

use shared_bus::{Answer, QueryKind, SocialEvent};
use shared_types::{ActivityId, ChatMessageRecord, MessageId, RequestId, UserSnapshot};
use std::collections::HashMap;

/// The payload of a response event, stripped of its request id.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryReply {
    /// Answer to a user lookup.
    User(Answer<Option<UserSnapshot>>),
    /// Answer to an are-friends check.
    AreFriends(Answer<bool>),
    /// Answer to a mutual-friend count.
    MutualFriends(Answer<u64>),
    /// Answer to a save-friendship command.
    FriendshipSaved(Answer<bool>),
    /// Answer to a message-id lookup.
    MessageIds(Answer<Vec<MessageId>>),
    /// Answer to a batch message-id lookup.
    MessageIdsBatch(Answer<HashMap<ActivityId, Vec<MessageId>>>),
    /// Answer to a full-message lookup.
    FullMessages(Answer<Vec<ChatMessageRecord>>),
}

impl QueryReply {
    /// Split a response event into its request id and payload.
    ///
    /// Returns `None` for query events.
    #[must_use]
    pub fn from_event(event: SocialEvent) -> Option<(RequestId, QueryReply)> {
        let pair = match event {
            SocialEvent::UserFetched { request_id, result } => (request_id, Self::User(result)),
            SocialEvent::FriendshipChecked { request_id, result } => {
                (request_id, Self::AreFriends(result))
            }
            SocialEvent::MutualFriendsCounted { request_id, result } => {
                (request_id, Self::MutualFriends(result))
            }
            SocialEvent::FriendshipSaved { request_id, result } => {
                (request_id, Self::FriendshipSaved(result))
            }
            SocialEvent::MessageIdsFetched { request_id, result } => {
                (request_id, Self::MessageIds(result))
            }
            SocialEvent::MessageIdsBatchFetched { request_id, result } => {
                (request_id, Self::MessageIdsBatch(result))
            }
            SocialEvent::FullMessagesFetched { request_id, result } => {
                (request_id, Self::FullMessages(result))
            }
            SocialEvent::GetUser { .. }
            | SocialEvent::AreFriends { .. }
            | SocialEvent::CountMutualFriends { .. }
            | SocialEvent::SaveFriendship { .. }
            | SocialEvent::GetMessageIds { .. }
            | SocialEvent::GetMessageIdsBatch { .. }
            | SocialEvent::GetFullMessages { .. } => return None,
        };
        Some(pair)
    }

    /// The query kind this payload answers.
    #[must_use]
    pub fn kind(&self) -> QueryKind {
        match self {
            Self::User(_) => QueryKind::GetUser,
            Self::AreFriends(_) => QueryKind::AreFriends,
            Self::MutualFriends(_) => QueryKind::CountMutualFriends,
            Self::FriendshipSaved(_) => QueryKind::SaveFriendship,
            Self::MessageIds(_) => QueryKind::GetMessageIds,
            Self::MessageIdsBatch(_) => QueryKind::GetMessageIdsBatch,
            Self::FullMessages(_) => QueryKind::GetFullMessages,
        }
    }
}
