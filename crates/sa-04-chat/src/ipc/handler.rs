//! # Chat Query Responder
//!
//! Answers message queries from other modules.
//!
//! | Query | Response |
//! |-------|----------|
//! | `GetMessageIds` | `MessageIdsFetched` |
//! | `GetMessageIdsBatch` | `MessageIdsBatchFetched` (only activities with messages) |
//! | `GetFullMessages` | `FullMessagesFetched` |

use crate::ports::outbound::ChatStore;
use futures::StreamExt;
use shared_bus::{EventFilter, EventPublisher, EventStream, EventTopic, InMemoryEventBus, SocialEvent};
use shared_types::{ResponderError, StoreError};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Serves message queries over the event bus.
pub struct ChatQueryResponder {
    store: Arc<dyn ChatStore>,
    bus: Arc<InMemoryEventBus>,
    events: EventStream,
}

impl ChatQueryResponder {
    /// Create a responder subscribed to the Chat topic.
    pub fn new(store: Arc<dyn ChatStore>, bus: Arc<InMemoryEventBus>) -> Self {
        let events = bus.event_stream(EventFilter::topics(vec![EventTopic::Chat]));
        Self { store, bus, events }
    }

    /// Build the response to a query, `None` for anything not addressed here.
    pub fn answer(&self, event: SocialEvent) -> Option<SocialEvent> {
        let response = match event {
            SocialEvent::GetMessageIds {
                request_id,
                activity_id,
            } => SocialEvent::MessageIdsFetched {
                request_id,
                result: self
                    .store
                    .message_ids(activity_id)
                    .map_err(|err| store_failure("get_message_ids", &err)),
            },
            SocialEvent::GetMessageIdsBatch {
                request_id,
                activity_ids,
            } => SocialEvent::MessageIdsBatchFetched {
                request_id,
                result: self
                    .store
                    .message_ids_batch(&activity_ids)
                    .map_err(|err| store_failure("get_message_ids_batch", &err)),
            },
            SocialEvent::GetFullMessages {
                request_id,
                activity_id,
            } => SocialEvent::FullMessagesFetched {
                request_id,
                result: self
                    .store
                    .messages(activity_id)
                    .map_err(|err| store_failure("get_full_messages", &err)),
            },
            other => {
                warn!(kind = %other.query_kind(), "Unexpected event on Chat topic");
                return None;
            }
        };
        Some(response)
    }

    /// Answer queries until the bus closes.
    #[instrument(skip(self), name = "chat_query_responder")]
    pub async fn run(mut self) {
        info!("[sa-04] Chat query responder started");

        while let Some(event) = self.events.next().await {
            let request_id = event.request_id();
            if let Some(response) = self.answer(event) {
                let receivers = self.bus.publish(response).await;
                debug!(request_id = %request_id, receivers, "Published message query response");
            }
        }

        info!("[sa-04] Event bus closed, chat query responder stopping");
    }

    /// Run the responder on its own task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

fn store_failure(operation: &str, err: &StoreError) -> ResponderError {
    warn!(operation, error = %err, "Chat store failed");
    ResponderError::store(err)
}
