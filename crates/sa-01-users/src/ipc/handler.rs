//! # User Query Responder
//!
//! Answers `GetUser` queries from other modules.
//!
//! ```text
//! Event Bus (Users topic) ──GetUser──→ UserQueryResponder ──→ UserDirectory
//!                                            │
//!                     UserFetched ←──────────┘ (QueryResponses topic)
//! ```

use crate::ports::outbound::UserDirectory;
use shared_bus::{EventFilter, EventPublisher, EventTopic, InMemoryEventBus, SocialEvent, Subscription};
use shared_types::{ResponderError, UserId, UserSnapshot};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Serves user lookups over the event bus.
pub struct UserQueryResponder {
    /// Source of user snapshots
    directory: Arc<dyn UserDirectory>,
    /// Bus responses are published on
    bus: Arc<InMemoryEventBus>,
    /// Subscription to the Users topic
    subscription: Subscription,
}

impl UserQueryResponder {
    /// Create a responder subscribed to the Users topic.
    pub fn new(directory: Arc<dyn UserDirectory>, bus: Arc<InMemoryEventBus>) -> Self {
        let subscription = bus.subscribe(EventFilter::topics(vec![EventTopic::Users]));
        Self {
            directory,
            bus,
            subscription,
        }
    }

    /// Build the response to a query, `None` for anything not addressed here.
    pub fn answer(&self, event: SocialEvent) -> Option<SocialEvent> {
        match event {
            SocialEvent::GetUser {
                request_id,
                user_id,
            } => Some(SocialEvent::UserFetched {
                request_id,
                result: self.lookup(user_id),
            }),
            other => {
                warn!(kind = %other.query_kind(), "Unexpected event on Users topic");
                None
            }
        }
    }

    fn lookup(&self, user_id: UserId) -> Result<Option<UserSnapshot>, ResponderError> {
        self.directory.find_user(user_id).map_err(|err| {
            warn!(user_id = %user_id, error = %err, "User lookup failed");
            ResponderError::store(&err)
        })
    }

    /// Answer queries until the bus closes.
    #[instrument(skip(self), name = "user_query_responder")]
    pub async fn run(mut self) {
        info!("[sa-01] User query responder started");

        while let Some(event) = self.subscription.recv().await {
            let request_id = event.request_id();
            if let Some(response) = self.answer(event) {
                let receivers = self.bus.publish(response).await;
                debug!(request_id = %request_id, receivers, "Published user lookup response");
            }
        }

        info!("[sa-01] Event bus closed, user query responder stopping");
    }

    /// Run the responder on its own task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
