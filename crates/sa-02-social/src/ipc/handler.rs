//! # Social Query Responder
//!
//! Answers relationship queries from other modules.
//!
//! | Query | Response |
//! |-------|----------|
//! | `AreFriends` | `FriendshipChecked` |
//! | `CountMutualFriends` | `MutualFriendsCounted` |
//! | `SaveFriendship` | `FriendshipSaved` |

use crate::domain::SaveOutcome;
use crate::ports::outbound::FriendshipStore;
use shared_bus::{EventFilter, EventPublisher, EventTopic, InMemoryEventBus, SocialEvent, Subscription};
use shared_types::{ResponderError, StoreError, UserId};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Serves relationship queries over the event bus.
pub struct SocialQueryResponder {
    store: Arc<dyn FriendshipStore>,
    bus: Arc<InMemoryEventBus>,
    subscription: Subscription,
}

impl SocialQueryResponder {
    /// Create a responder subscribed to the Social topic.
    pub fn new(store: Arc<dyn FriendshipStore>, bus: Arc<InMemoryEventBus>) -> Self {
        let subscription = bus.subscribe(EventFilter::topics(vec![EventTopic::Social]));
        Self {
            store,
            bus,
            subscription,
        }
    }

    /// Build the response to a query, `None` for anything not addressed here.
    pub fn answer(&self, event: SocialEvent) -> Option<SocialEvent> {
        let response = match event {
            SocialEvent::AreFriends {
                request_id,
                user_id,
                other_id,
            } => SocialEvent::FriendshipChecked {
                request_id,
                result: self
                    .store
                    .are_friends(user_id, other_id)
                    .map_err(|err| store_failure("are_friends", user_id, other_id, &err)),
            },
            SocialEvent::CountMutualFriends {
                request_id,
                user_id,
                other_id,
            } => SocialEvent::MutualFriendsCounted {
                request_id,
                result: self
                    .store
                    .mutual_friend_count(user_id, other_id)
                    .map_err(|err| store_failure("count_mutual_friends", user_id, other_id, &err)),
            },
            SocialEvent::SaveFriendship {
                request_id,
                user_id,
                friend_id,
            } => SocialEvent::FriendshipSaved {
                request_id,
                result: self.save(user_id, friend_id),
            },
            other => {
                warn!(kind = %other.query_kind(), "Unexpected event on Social topic");
                return None;
            }
        };
        Some(response)
    }

    fn save(&self, user_id: UserId, friend_id: UserId) -> Result<bool, ResponderError> {
        if user_id == friend_id {
            return Err(ResponderError::invalid(format!(
                "user {user_id} cannot befriend themselves"
            )));
        }
        match self.store.save_friendship(user_id, friend_id) {
            Ok(SaveOutcome::Created) => {
                info!(user_id = %user_id, friend_id = %friend_id, "[sa-02] Friendship created");
                Ok(true)
            }
            Ok(SaveOutcome::AlreadyFriends) => {
                debug!(user_id = %user_id, friend_id = %friend_id, "Friendship already exists");
                Ok(true)
            }
            Err(err) => Err(store_failure("save_friendship", user_id, friend_id, &err)),
        }
    }

    /// Answer queries until the bus closes.
    #[instrument(skip(self), name = "social_query_responder")]
    pub async fn run(mut self) {
        info!("[sa-02] Social query responder started");

        while let Some(event) = self.subscription.recv().await {
            let request_id = event.request_id();
            if let Some(response) = self.answer(event) {
                let receivers = self.bus.publish(response).await;
                debug!(request_id = %request_id, receivers, "Published relationship response");
            }
        }

        info!("[sa-02] Event bus closed, social query responder stopping");
    }

    /// Run the responder on its own task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

fn store_failure(operation: &str, a: UserId, b: UserId, err: &StoreError) -> ResponderError {
    warn!(operation, user_id = %a, other_id = %b, error = %err, "Friendship store failed");
    ResponderError::store(err)
}
