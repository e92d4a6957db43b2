//! # Event Subscriber
//!
//! Defines the subscription side of the event bus.

use crate::events::{EventFilter, SocialEvent};
use crate::publisher::FilterTable;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Trait for subscribing to events from the bus.
pub trait EventSubscriber: Send + Sync {
    /// Subscribe to events matching a filter.
    fn subscribe(&self, filter: EventFilter) -> Subscription;
}

impl EventSubscriber for crate::InMemoryEventBus {
    fn subscribe(&self, filter: EventFilter) -> Subscription {
        crate::InMemoryEventBus::subscribe(self, filter)
    }
}

/// A subscription handle for receiving events.
///
/// While it lives, publishes of matching events count it as a recipient.
/// Dropping it removes its filter from the bus.
pub struct Subscription {
    receiver: broadcast::Receiver<SocialEvent>,
    filter: EventFilter,
    filters: FilterTable,
    id: u64,
}

impl Subscription {
    pub(crate) fn new(
        receiver: broadcast::Receiver<SocialEvent>,
        filter: EventFilter,
        filters: FilterTable,
        id: u64,
    ) -> Self {
        Self {
            receiver,
            filter,
            filters,
            id,
        }
    }

    /// Receive the next event that matches the filter.
    ///
    /// Returns `None` once the bus is dropped. Events lost to lag are
    /// skipped with a warning.
    pub async fn recv(&mut self) -> Option<SocialEvent> {
        loop {
            let event = match self.receiver.recv().await {
                Ok(e) => e,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    warn!(
                        subscription = self.id,
                        topics = ?self.filter.topics,
                        lagged = count,
                        "Subscriber lagged, some events dropped"
                    );
                    continue;
                }
            };

            if self.filter.matches(&event) {
                return Some(event);
            }
        }
    }

    /// Get the filter for this subscription.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Ok(mut filters) = self.filters.write() {
            filters.remove(&self.id);
        }
        debug!(subscription = self.id, "Subscription dropped");
    }
}

/// A stream wrapper for subscriptions.
///
/// Ends when the bus is dropped.
pub struct EventStream {
    filter: EventFilter,
    inner: BoxStream<'static, SocialEvent>,
}

impl EventStream {
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        let filter = subscription.filter().clone();
        let inner = stream::unfold(subscription, |mut sub| async move {
            sub.recv().await.map(|event| (event, sub))
        })
        .boxed();

        Self { filter, inner }
    }

    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

impl Stream for EventStream {
    type Item = SocialEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventTopic;
    use crate::publisher::InMemoryEventBus;
    use crate::EventPublisher;
    use shared_types::{ActivityId, RequestId, UserId};
    use std::time::Duration;
    use tokio::time::timeout;

    fn get_user() -> SocialEvent {
        SocialEvent::GetUser {
            request_id: RequestId::new(),
            user_id: UserId::new(),
        }
    }

    fn get_message_ids() -> SocialEvent {
        SocialEvent::GetMessageIds {
            request_id: RequestId::new(),
            activity_id: ActivityId::new(),
        }
    }

    #[tokio::test]
    async fn test_subscription_recv() {
        let bus = InMemoryEventBus::new();
        let mut sub = bus.subscribe(EventFilter::all());

        bus.publish(get_user()).await;

        let received = timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout")
            .expect("event");

        assert!(matches!(received, SocialEvent::GetUser { .. }));
    }

    #[tokio::test]
    async fn test_subscription_filter() {
        let bus = InMemoryEventBus::new();

        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Chat]));

        // Users event is filtered out
        bus.publish(get_user()).await;
        bus.publish(get_message_ids()).await;

        let received = timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout")
            .expect("event");

        assert!(matches!(received, SocialEvent::GetMessageIds { .. }));
    }

    #[tokio::test]
    async fn test_subscription_drop_cleanup() {
        let bus = InMemoryEventBus::new();

        {
            let _sub1 = bus.subscribe(EventFilter::all());
            let _sub2 = bus.subscribe(EventFilter::all());
            assert_eq!(bus.subscriber_count(), 2);
        }

        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(get_user()).await, 0);
    }

    #[tokio::test]
    async fn test_event_stream_yields_matching_events() {
        let bus = InMemoryEventBus::new();
        let mut stream = bus.event_stream(EventFilter::topics(vec![EventTopic::Users]));

        bus.publish(get_message_ids()).await;
        bus.publish(get_user()).await;

        let received = timeout(Duration::from_millis(100), stream.next())
            .await
            .expect("timeout")
            .expect("event");
        assert!(matches!(received, SocialEvent::GetUser { .. }));
        assert_eq!(EventStream::filter(&stream).topics, vec![EventTopic::Users]);
    }

    #[tokio::test]
    async fn test_event_stream_ends_when_bus_dropped() {
        let bus = InMemoryEventBus::new();
        let mut stream = bus.event_stream(EventFilter::all());
        drop(bus);

        assert!(stream.next().await.is_none());
    }
}
