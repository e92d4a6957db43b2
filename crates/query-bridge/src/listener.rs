//! # Response Listener
//!
//! Subscribes to the `QueryResponses` topic and hands every response to the
//! correlation registry. Responses nobody waits for any more are dropped by
//! the registry.

use crate::registry::CorrelationRegistry;
use crate::reply::QueryReply;
use shared_bus::{EventFilter, EventSubscriber, EventTopic, SocialEvent, Subscription};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

/// Routes response events to waiting callers.
pub struct ResponseListener {
    /// Subscription to response events
    subscription: Subscription,
    /// Registry to complete
    registry: Arc<CorrelationRegistry>,
}

impl ResponseListener {
    /// Subscribe to response events.
    ///
    /// The subscription exists as soon as this returns, so construct the
    /// listener before any query is issued.
    pub fn new(bus: &dyn EventSubscriber, registry: Arc<CorrelationRegistry>) -> Self {
        let subscription = bus.subscribe(EventFilter::topics(vec![EventTopic::QueryResponses]));
        Self {
            subscription,
            registry,
        }
    }

    /// Complete the pending query a response belongs to.
    ///
    /// Returns true if a waiting caller received it.
    pub fn handle_event(&self, event: SocialEvent) -> bool {
        match QueryReply::from_event(event) {
            Some((request_id, reply)) => self.registry.complete(request_id, reply),
            None => {
                warn!("Query event delivered to response listener");
                false
            }
        }
    }

    /// Process responses until the bus closes.
    #[instrument(skip(self), name = "response_listener")]
    pub async fn run(mut self) {
        info!("Response listener started");

        while let Some(event) = self.subscription.recv().await {
            self.handle_event(event);
        }

        info!("Event bus closed, response listener stopping");
    }

    /// Run the listener on its own task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
