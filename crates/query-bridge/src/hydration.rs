//! # Chat Message Hydration
//!
//! Builds display-ready message cards from identifier-only records:
//!
//! 1. one `get_full_messages` query for the activity
//! 2. one `get_user` query per distinct sender or liker, run concurrently
//!    (the bridge caps how many are on the bus at a time)
//! 3. assemble cards in the original order
//!
//! A user that cannot be resolved costs only what references it: a liker is
//! left out of `liked_by`, a sender takes its message out of the list.

use crate::facades::{ChatQueries, UserQueries};
use crate::metrics;
use futures::future::join_all;
use shared_types::{distinct_ids, ActivityId, ChatMessageRecord, ChatMessageView, UserId, UserSnapshot};
use std::collections::HashMap;
use std::iter;
use tracing::{debug, warn};

/// Resolves the user references of chat messages.
#[derive(Clone)]
pub struct ChatMessageHydrator {
    chat: ChatQueries,
    users: UserQueries,
}

impl ChatMessageHydrator {
    pub fn new(chat: ChatQueries, users: UserQueries) -> Self {
        Self { chat, users }
    }

    /// Fetch and hydrate every message of an activity's chat.
    pub async fn hydrate_activity_messages(&self, activity_id: ActivityId) -> Vec<ChatMessageView> {
        let records = self.chat.full_messages(activity_id).await;
        debug!(
            activity_id = %activity_id,
            messages = records.len(),
            "Hydrating chat messages"
        );
        self.hydrate(records).await
    }

    /// Hydrate already fetched records, keeping their order.
    pub async fn hydrate(&self, records: Vec<ChatMessageRecord>) -> Vec<ChatMessageView> {
        if records.is_empty() {
            return Vec::new();
        }

        let referenced = distinct_ids(records.iter().flat_map(|record| {
            iter::once(record.sender_id).chain(record.liked_by.iter().copied())
        }));
        let resolved = self.resolve_users(referenced).await;

        records
            .into_iter()
            .filter_map(|record| assemble(record, &resolved))
            .collect()
    }

    /// Look up every user concurrently, keeping the ones that resolved.
    async fn resolve_users(&self, user_ids: Vec<UserId>) -> HashMap<UserId, UserSnapshot> {
        let lookups = user_ids.iter().map(|user_id| self.users.get_user(*user_id));
        let results = join_all(lookups).await;

        let mut resolved = HashMap::with_capacity(user_ids.len());
        for (user_id, result) in user_ids.into_iter().zip(results) {
            match result {
                Ok(user) => {
                    resolved.insert(user_id, user);
                }
                Err(err) => {
                    warn!(
                        user_id = %user_id,
                        reason = %err.reason,
                        "Referenced user could not be resolved"
                    );
                }
            }
        }
        resolved
    }
}

/// Build one card, or `None` if its sender is unknown.
fn assemble(
    record: ChatMessageRecord,
    resolved: &HashMap<UserId, UserSnapshot>,
) -> Option<ChatMessageView> {
    let Some(sender) = resolved.get(&record.sender_id) else {
        metrics::record_hydration_drop("message");
        warn!(
            message_id = %record.id,
            activity_id = %record.activity_id,
            sender_id = %record.sender_id,
            "Dropping message with unresolvable sender"
        );
        return None;
    };

    let liked_by = record
        .liked_by
        .iter()
        .filter_map(|liker_id| {
            let liker = resolved.get(liker_id);
            if liker.is_none() {
                metrics::record_hydration_drop("liker");
                debug!(message_id = %record.id, liker_id = %liker_id, "Omitting unresolvable liker");
            }
            liker.cloned()
        })
        .collect();

    Some(ChatMessageView {
        id: record.id,
        activity_id: record.activity_id,
        sender: sender.clone(),
        content: record.content,
        sent_at: record.sent_at,
        liked_by,
    })
}
