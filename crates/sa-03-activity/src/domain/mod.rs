//! Activity domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{ActivityId, ChatMessageView, Identified, UserId, UserSnapshot};

/// Longest accepted activity title.
pub const MAX_TITLE_LEN: usize = 120;

/// Who may see an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// Everyone.
    Public,
    /// The host and the host's friends.
    FriendsOnly,
}

/// Input for creating an activity.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub host_id: UserId,
    pub title: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub visibility: Visibility,
}

/// An activity hosted by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub host_id: UserId,
    pub title: String,
    pub description: String,
    pub starts_at: DateTime<Utc>,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// Validate input and create an activity with a fresh id.
    pub fn create(input: NewActivity) -> Result<Self, &'static str> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err("title is empty");
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err("title longer than 120 characters");
        }

        Ok(Self {
            id: ActivityId::new(),
            host_id: input.host_id,
            title: title.to_string(),
            description: input.description.trim().to_string(),
            starts_at: input.starts_at,
            visibility: input.visibility,
            created_at: Utc::now(),
        })
    }

    /// Whether `viewer` can see this without asking about friendship.
    #[must_use]
    pub fn openly_visible_to(&self, viewer: UserId) -> bool {
        self.visibility == Visibility::Public || self.host_id == viewer
    }
}

impl Identified for Activity {
    type Id = ActivityId;

    fn id(&self) -> ActivityId {
        self.id
    }
}

/// One row of a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub activity: Activity,
    /// Chat messages posted so far.
    pub message_count: usize,
}

/// An activity page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityDetail {
    pub activity: Activity,
    pub host: UserSnapshot,
    /// Chat cards, oldest first, without messages from users the viewer blocked.
    pub messages: Vec<ChatMessageView>,
}
