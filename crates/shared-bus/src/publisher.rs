//! # Event Publisher
//!
//! Defines the publishing side of the event bus.

use crate::events::{EventFilter, SocialEvent};
use crate::subscriber::{EventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Live subscription filters keyed by subscription id.
pub(crate) type FilterTable = Arc<RwLock<HashMap<u64, EventFilter>>>;

/// Trait for publishing events to the bus.
///
/// This is the only interface modules use to reach each other. A module
/// never holds a reference to another module's service.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event to the bus.
    ///
    /// # Returns
    ///
    /// The number of live subscriptions whose filter accepts the event.
    /// Zero means nobody will ever see it.
    async fn publish(&self, event: SocialEvent) -> usize;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}

/// In-memory implementation of the event bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer semantics.
/// Every receiver sees every event and filters on receive, so the channel
/// capacity bounds the total burst, not a per-topic one. Events live only
/// in process memory and are lost on restart.
pub struct InMemoryEventBus {
    /// Broadcast sender for events.
    sender: broadcast::Sender<SocialEvent>,

    /// Filters of the live subscriptions.
    filters: FilterTable,

    /// Next subscription id.
    next_subscription: AtomicU64,

    /// Total events published.
    events_published: AtomicU64,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory event bus with specified capacity.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            filters: Arc::new(RwLock::new(HashMap::new())),
            next_subscription: AtomicU64::new(0),
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to events matching a filter.
    ///
    /// Only events published after this call are delivered.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        let receiver = self.sender.subscribe();
        let id = self.next_subscription.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut filters) = self.filters.write() {
            filters.insert(id, filter.clone());
        }

        debug!(subscription = id, topics = ?filter.topics, "New subscription created");

        Subscription::new(receiver, filter, Arc::clone(&self.filters), id)
    }

    /// Get a stream of events matching a filter.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.subscribe(filter))
    }

    /// Get the number of active subscribers, whatever their filter.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Get the channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn interested(&self, event: &SocialEvent) -> usize {
        self.filters
            .read()
            .map(|filters| filters.values().filter(|f| f.matches(event)).count())
            .unwrap_or(0)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: SocialEvent) -> usize {
        let topic = event.topic();
        let kind = event.query_kind();
        let request_id = event.request_id();

        // Always increment counter (event was attempted)
        self.events_published.fetch_add(1, Ordering::Relaxed);

        let interested = self.interested(&event);
        if interested == 0 {
            warn!(
                topic = ?topic,
                kind = %kind,
                request_id = %request_id,
                "Event dropped (no subscriber for topic)"
            );
            return 0;
        }

        match self.sender.send(event) {
            Ok(receivers) => {
                debug!(
                    topic = ?topic,
                    kind = %kind,
                    request_id = %request_id,
                    interested,
                    receivers,
                    "Event published"
                );
                interested
            }
            // A subscription dropped between the count and the send
            Err(_) => 0,
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
