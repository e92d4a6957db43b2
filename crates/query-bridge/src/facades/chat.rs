//! Message queries against the Chat module.
//!
//! Collection queries fall back to empty collections.

use super::settle;
use crate::bridge::QueryBridge;
use crate::reply::QueryReply;
use shared_bus::{QueryKind, SocialEvent};
use shared_types::{distinct_ids, ActivityId, ChatMessageRecord, MessageId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Queries answered by the Chat module.
#[derive(Clone)]
pub struct ChatQueries {
    bridge: QueryBridge,
}

impl ChatQueries {
    pub fn new(bridge: QueryBridge) -> Self {
        Self { bridge }
    }

    /// Message ids of one activity's chat. Empty when unanswered.
    pub async fn message_ids(&self, activity_id: ActivityId) -> Vec<MessageId> {
        let kind = QueryKind::GetMessageIds;
        let key = activity_id.to_string();

        let outcome = self
            .bridge
            .issue_query(kind, &key, |request_id| SocialEvent::GetMessageIds {
                request_id,
                activity_id,
            })
            .await;

        settle(kind, &key, outcome, |reply| match reply {
            QueryReply::MessageIds(answer) => Some(answer),
            _ => None,
        })
        .unwrap_or_default()
    }

    /// Message ids of many activities in a single round trip.
    ///
    /// Only activities with at least one message appear in the map, so a
    /// missing key reads as an empty list. Duplicate keys are collapsed and
    /// an empty key set issues no query at all. Empty when unanswered.
    pub async fn message_ids_batch(
        &self,
        activity_ids: &[ActivityId],
    ) -> HashMap<ActivityId, Vec<MessageId>> {
        let keys = distinct_ids(activity_ids.iter().copied());
        if keys.is_empty() {
            debug!("Empty batch, skipping message id query");
            return HashMap::new();
        }

        let kind = QueryKind::GetMessageIdsBatch;
        let key = format!("{} activities", keys.len());
        let requested: HashSet<ActivityId> = keys.iter().copied().collect();

        let outcome = self
            .bridge
            .issue_query(kind, &key, |request_id| SocialEvent::GetMessageIdsBatch {
                request_id,
                activity_ids: keys,
            })
            .await;

        let mut batch = settle(kind, &key, outcome, |reply| match reply {
            QueryReply::MessageIdsBatch(answer) => Some(answer),
            _ => None,
        })
        .unwrap_or_default();

        batch.retain(|activity_id, ids| requested.contains(activity_id) && !ids.is_empty());
        batch
    }

    /// Full message records of one activity's chat. Empty when unanswered.
    pub async fn full_messages(&self, activity_id: ActivityId) -> Vec<ChatMessageRecord> {
        let kind = QueryKind::GetFullMessages;
        let key = activity_id.to_string();

        let outcome = self
            .bridge
            .issue_query(kind, &key, |request_id| SocialEvent::GetFullMessages {
                request_id,
                activity_id,
            })
            .await;

        settle(kind, &key, outcome, |reply| match reply {
            QueryReply::FullMessages(answer) => Some(answer),
            _ => None,
        })
        .unwrap_or_default()
    }
}
