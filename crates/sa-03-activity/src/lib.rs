//! # sa-03-activity
//!
//! Activity module: activities, the feed and activity detail pages.
//!
//! Activity owns no users, friendships or messages. Everything it shows
//! about them comes through the query bridge:
//!
//! | Need | Query | When unanswered |
//! |------|-------|-----------------|
//! | Host of an activity | `get_user` | detail page fails with `HostUnavailable` |
//! | Friends-only visibility | `are_friends` | activity treated as hidden |
//! | Feed message counts | `get_message_ids_batch` | counts read as 0 |
//! | Detail page messages | `get_full_messages` + `get_user` per user | partial list |
//!
//! ```text
//! Activity (3) ──GetUser──────────────→ Users (1)
//! Activity (3) ──AreFriends───────────→ Social (2)
//! Activity (3) ──GetMessageIdsBatch───→ Chat (4)
//! Activity (3) ──GetFullMessages──────→ Chat (4)
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryActivityStore, InMemoryBlockList};
pub use domain::{Activity, ActivityDetail, FeedEntry, NewActivity, Visibility, MAX_TITLE_LEN};
pub use error::{ActivityError, ActivityResult};
pub use ports::{ActivityApi, ActivityStore, BlockList};
pub use service::{ActivityQueries, ActivityService};
