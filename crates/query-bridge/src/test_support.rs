//! Bus, bridge and scripted responders for unit tests.

use crate::config::BridgeConfig;
use crate::listener::ResponseListener;
use crate::registry::CorrelationRegistry;
use crate::QueryBridge;
use shared_bus::{EventFilter, EventPublisher, EventTopic, InMemoryEventBus, SocialEvent, Subscription};
use std::sync::Arc;
use std::time::Duration;

pub(crate) struct Harness {
    pub bus: Arc<InMemoryEventBus>,
    pub bridge: QueryBridge,
}

impl Harness {
    /// Bus plus a running response listener, 5000 ms window.
    pub fn new() -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let registry = Arc::new(CorrelationRegistry::new());
        ResponseListener::new(bus.as_ref(), Arc::clone(&registry)).spawn();
        let bridge = QueryBridge::new(
            registry,
            bus.clone(),
            &BridgeConfig::with_timeout(Duration::from_millis(5000)),
        );
        Self { bus, bridge }
    }

    /// Answer every query on `topic` with whatever `answer` returns.
    pub fn respond<F>(&self, topic: EventTopic, answer: F)
    where
        F: Fn(SocialEvent) -> Option<SocialEvent> + Send + 'static,
    {
        let mut sub = self.bus.subscribe(EventFilter::topics(vec![topic]));
        let bus = Arc::clone(&self.bus);
        tokio::spawn(async move {
            while let Some(event) = sub.recv().await {
                if let Some(response) = answer(event) {
                    bus.publish(response).await;
                }
            }
        });
    }

    /// Subscribe to `topic` without ever answering.
    pub fn silent(&self, topic: EventTopic) -> Subscription {
        self.bus.subscribe(EventFilter::topics(vec![topic]))
    }

    pub fn pending(&self) -> usize {
        self.bridge.registry().pending_count()
    }
}
