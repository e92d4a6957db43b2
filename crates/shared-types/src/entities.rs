//! # Cross-Module Records
//!
//! Identifiers and plain data records that modules exchange over the bus.
//!
//! ## Clusters
//!
//! - **Identity**: `UserId`, `ActivityId`, `MessageId`
//! - **Users**: `UserSnapshot`
//! - **Chat**: `ChatMessageRecord` (identifiers only), `ChatMessageView` (hydrated)
//!
//! Every record here is a value copied at response-construction time. None of
//! them hold a reference back into the owning module's storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::identity::Identified;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse from the canonical hyphenated form.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Uuid::parse_str(s).map(Self)
            }

            /// Get the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

uuid_id!(
    /// Identifier of a registered user (owned by the User module).
    UserId
);

uuid_id!(
    /// Identifier of an activity (owned by the Activity module).
    ActivityId
);

uuid_id!(
    /// Identifier of a chat message (owned by the Chat module).
    MessageId
);

// =============================================================================
// USERS
// =============================================================================

/// Display identity of a user as seen by other modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    /// The user's identifier.
    pub id: UserId,
    /// Unique handle.
    pub username: String,
    /// Name shown on cards and feeds.
    pub display_name: String,
    /// Profile picture, if the user uploaded one.
    pub avatar_url: Option<String>,
}

impl Identified for UserSnapshot {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

// =============================================================================
// CHAT
// =============================================================================

/// A chat message as stored by the Chat module.
///
/// Users are referenced by id only so the consumer can resolve each of them
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageRecord {
    /// The message identifier.
    pub id: MessageId,
    /// Activity whose chat this message belongs to.
    pub activity_id: ActivityId,
    /// Author of the message.
    pub sender_id: UserId,
    /// Message body.
    pub content: String,
    /// When the message was posted.
    pub sent_at: DateTime<Utc>,
    /// Users who liked the message, in the order they liked it.
    pub liked_by: Vec<UserId>,
}

impl Identified for ChatMessageRecord {
    type Id = MessageId;

    fn id(&self) -> MessageId {
        self.id
    }
}

/// A display-ready chat message card with resolved user identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageView {
    /// The message identifier.
    pub id: MessageId,
    /// Activity whose chat this message belongs to.
    pub activity_id: ActivityId,
    /// Resolved author.
    pub sender: UserSnapshot,
    /// Message body.
    pub content: String,
    /// When the message was posted.
    pub sent_at: DateTime<Utc>,
    /// Resolved likers. Unresolvable likers are omitted.
    pub liked_by: Vec<UserSnapshot>,
}

impl ChatMessageView {
    /// Number of likes that could be attributed to a known user.
    #[must_use]
    pub fn like_count(&self) -> usize {
        self.liked_by.len()
    }
}

impl Identified for ChatMessageView {
    type Id = MessageId;

    fn id(&self) -> MessageId {
        self.id
    }
}
