//! # Social Events
//!
//! Defines every event type that flows through the shared bus.
//!
//! Cross-module reads are modelled as a query event addressed to the owning
//! module's topic and a paired response event on [`EventTopic::QueryResponses`].
//! Both carry the same [`RequestId`].

use serde::{Deserialize, Serialize};
use shared_types::{
    ActivityId, ChatMessageRecord, MessageId, ModuleId, RequestId, ResponderError, UserId,
    UserSnapshot,
};
use std::collections::HashMap;
use std::fmt;

/// Result carried by a response event.
pub type Answer<T> = Result<T, ResponderError>;

/// All events that can be published to the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SocialEvent {
    // =========================================================================
    // USERS
    // =========================================================================
    /// Ask the User module for a user snapshot.
    /// Source: any module | Target: Users
    GetUser { request_id: RequestId, user_id: UserId },

    /// Answer to [`SocialEvent::GetUser`]. `Ok(None)` means the user does not exist.
    UserFetched {
        request_id: RequestId,
        result: Answer<Option<UserSnapshot>>,
    },

    // =========================================================================
    // SOCIAL
    // =========================================================================
    /// Ask whether two users are friends.
    /// Source: any module | Target: Social
    AreFriends {
        request_id: RequestId,
        user_id: UserId,
        other_id: UserId,
    },

    /// Answer to [`SocialEvent::AreFriends`].
    FriendshipChecked {
        request_id: RequestId,
        result: Answer<bool>,
    },

    /// Ask how many friends two users have in common.
    /// Source: any module | Target: Social
    CountMutualFriends {
        request_id: RequestId,
        user_id: UserId,
        other_id: UserId,
    },

    /// Answer to [`SocialEvent::CountMutualFriends`].
    MutualFriendsCounted {
        request_id: RequestId,
        result: Answer<u64>,
    },

    /// Command the Social module to record a friendship. Idempotent.
    /// Source: any module | Target: Social
    SaveFriendship {
        request_id: RequestId,
        user_id: UserId,
        friend_id: UserId,
    },

    /// Answer to [`SocialEvent::SaveFriendship`]. `Ok(true)` when the
    /// friendship exists after the command.
    FriendshipSaved {
        request_id: RequestId,
        result: Answer<bool>,
    },

    // =========================================================================
    // CHAT
    // =========================================================================
    /// Ask for the message ids of one activity's chat.
    /// Source: any module | Target: Chat
    GetMessageIds {
        request_id: RequestId,
        activity_id: ActivityId,
    },

    /// Answer to [`SocialEvent::GetMessageIds`].
    MessageIdsFetched {
        request_id: RequestId,
        result: Answer<Vec<MessageId>>,
    },

    /// Ask for the message ids of many activities in one round trip.
    /// Source: any module | Target: Chat
    GetMessageIdsBatch {
        request_id: RequestId,
        activity_ids: Vec<ActivityId>,
    },

    /// Answer to [`SocialEvent::GetMessageIdsBatch`]. Activities without
    /// messages are absent from the map.
    MessageIdsBatchFetched {
        request_id: RequestId,
        result: Answer<HashMap<ActivityId, Vec<MessageId>>>,
    },

    /// Ask for the full message records of one activity's chat.
    /// Source: any module | Target: Chat
    GetFullMessages {
        request_id: RequestId,
        activity_id: ActivityId,
    },

    /// Answer to [`SocialEvent::GetFullMessages`].
    FullMessagesFetched {
        request_id: RequestId,
        result: Answer<Vec<ChatMessageRecord>>,
    },
}

/// The kinds of cross-module query the bus carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKind {
    /// Entity by id.
    GetUser,
    /// Relationship existence.
    AreFriends,
    /// Relationship count.
    CountMutualFriends,
    /// Relationship creation command.
    SaveFriendship,
    /// Message ids for one key.
    GetMessageIds,
    /// Message ids for many keys.
    GetMessageIdsBatch,
    /// Full message records for one key.
    GetFullMessages,
}

impl QueryKind {
    /// Every query kind.
    pub const ALL: [QueryKind; 7] = [
        Self::GetUser,
        Self::AreFriends,
        Self::CountMutualFriends,
        Self::SaveFriendship,
        Self::GetMessageIds,
        Self::GetMessageIdsBatch,
        Self::GetFullMessages,
    ];

    /// Stable snake_case name for logs and metric labels.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetUser => "get_user",
            Self::AreFriends => "are_friends",
            Self::CountMutualFriends => "count_mutual_friends",
            Self::SaveFriendship => "save_friendship",
            Self::GetMessageIds => "get_message_ids",
            Self::GetMessageIdsBatch => "get_message_ids_batch",
            Self::GetFullMessages => "get_full_messages",
        }
    }

    /// Module that answers this kind of query.
    #[must_use]
    pub fn owner(&self) -> ModuleId {
        match self {
            Self::GetUser => ModuleId::Users,
            Self::AreFriends | Self::CountMutualFriends | Self::SaveFriendship => ModuleId::Social,
            Self::GetMessageIds | Self::GetMessageIdsBatch | Self::GetFullMessages => {
                ModuleId::Chat
            }
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SocialEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::GetUser { .. } => EventTopic::Users,
            Self::AreFriends { .. } | Self::CountMutualFriends { .. } | Self::SaveFriendship { .. } => {
                EventTopic::Social
            }
            Self::GetMessageIds { .. }
            | Self::GetMessageIdsBatch { .. }
            | Self::GetFullMessages { .. } => EventTopic::Chat,
            Self::UserFetched { .. }
            | Self::FriendshipChecked { .. }
            | Self::MutualFriendsCounted { .. }
            | Self::FriendshipSaved { .. }
            | Self::MessageIdsFetched { .. }
            | Self::MessageIdsBatchFetched { .. }
            | Self::FullMessagesFetched { .. } => EventTopic::QueryResponses,
        }
    }

    /// The query kind this event belongs to, for queries and responses alike.
    #[must_use]
    pub fn query_kind(&self) -> QueryKind {
        match self {
            Self::GetUser { .. } | Self::UserFetched { .. } => QueryKind::GetUser,
            Self::AreFriends { .. } | Self::FriendshipChecked { .. } => QueryKind::AreFriends,
            Self::CountMutualFriends { .. } | Self::MutualFriendsCounted { .. } => {
                QueryKind::CountMutualFriends
            }
            Self::SaveFriendship { .. } | Self::FriendshipSaved { .. } => {
                QueryKind::SaveFriendship
            }
            Self::GetMessageIds { .. } | Self::MessageIdsFetched { .. } => {
                QueryKind::GetMessageIds
            }
            Self::GetMessageIdsBatch { .. } | Self::MessageIdsBatchFetched { .. } => {
                QueryKind::GetMessageIdsBatch
            }
            Self::GetFullMessages { .. } | Self::FullMessagesFetched { .. } => {
                QueryKind::GetFullMessages
            }
        }
    }

    /// The correlation id embedded in the event.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        match self {
            Self::GetUser { request_id, .. }
            | Self::UserFetched { request_id, .. }
            | Self::AreFriends { request_id, .. }
            | Self::FriendshipChecked { request_id, .. }
            | Self::CountMutualFriends { request_id, .. }
            | Self::MutualFriendsCounted { request_id, .. }
            | Self::SaveFriendship { request_id, .. }
            | Self::FriendshipSaved { request_id, .. }
            | Self::GetMessageIds { request_id, .. }
            | Self::MessageIdsFetched { request_id, .. }
            | Self::GetMessageIdsBatch { request_id, .. }
            | Self::MessageIdsBatchFetched { request_id, .. }
            | Self::GetFullMessages { request_id, .. }
            | Self::FullMessagesFetched { request_id, .. } => *request_id,
        }
    }

    /// Whether this is a response event.
    #[must_use]
    pub fn is_response(&self) -> bool {
        self.topic() == EventTopic::QueryResponses
    }

    /// Get the originating module.
    ///
    /// Responses come from the owner of their query kind. Queries can be
    /// issued by any module, so they are tagged as [`ModuleId::Runtime`].
    #[must_use]
    pub fn source_module(&self) -> ModuleId {
        if self.is_response() {
            self.query_kind().owner()
        } else {
            ModuleId::Runtime
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Queries answered by the User module.
    Users,
    /// Queries answered by the Social module.
    Social,
    /// Activity module events.
    Activity,
    /// Queries answered by the Chat module.
    Chat,
    /// Every response event, consumed by the query bridge.
    QueryResponses,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Source modules to include. Empty means all sources.
    pub source_modules: Vec<ModuleId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            source_modules: Vec::new(),
        }
    }

    /// Create a filter for events from specific modules.
    #[must_use]
    pub fn from_modules(modules: Vec<ModuleId>) -> Self {
        Self {
            topics: Vec::new(),
            source_modules: modules,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &SocialEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let source_match =
            self.source_modules.is_empty() || self.source_modules.contains(&event.source_module());

        topic_match && source_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn are_friends() -> SocialEvent {
        SocialEvent::AreFriends {
            request_id: RequestId::new(),
            user_id: UserId::new(),
            other_id: UserId::new(),
        }
    }

    #[test]
    fn test_query_topic_mapping() {
        assert_eq!(are_friends().topic(), EventTopic::Social);
        assert_eq!(are_friends().query_kind(), QueryKind::AreFriends);
        assert!(!are_friends().is_response());
    }

    #[test]
    fn test_response_topic_and_source() {
        let event = SocialEvent::FullMessagesFetched {
            request_id: RequestId::new(),
            result: Ok(Vec::new()),
        };
        assert_eq!(event.topic(), EventTopic::QueryResponses);
        assert_eq!(event.source_module(), ModuleId::Chat);
        assert_eq!(event.query_kind(), QueryKind::GetFullMessages);
    }

    #[test]
    fn test_request_id_roundtrip() {
        let request_id = RequestId::new();
        let event = SocialEvent::GetUser {
            request_id,
            user_id: UserId::new(),
        };
        assert_eq!(event.request_id(), request_id);
    }

    #[test]
    fn test_every_kind_has_owner() {
        for kind in QueryKind::ALL {
            assert_ne!(kind.owner(), ModuleId::Runtime);
            assert_ne!(kind.owner(), ModuleId::Activity);
        }
    }

    #[test]
    fn test_filter_all() {
        assert!(EventFilter::all().matches(&are_friends()));
    }

    #[test]
    fn test_filter_by_topic() {
        let filter = EventFilter::topics(vec![EventTopic::Chat]);
        assert!(!filter.matches(&are_friends()));

        let chat = SocialEvent::GetMessageIds {
            request_id: RequestId::new(),
            activity_id: ActivityId::new(),
        };
        assert!(filter.matches(&chat));
    }

    #[test]
    fn test_filter_by_module() {
        let filter = EventFilter::from_modules(vec![ModuleId::Social]);
        let saved = SocialEvent::FriendshipSaved {
            request_id: RequestId::new(),
            result: Ok(true),
        };
        assert!(filter.matches(&saved));
        assert!(!filter.matches(&are_friends()));
    }
}
