//! # Query Bridge
//!
//! Turns a publish/subscribe exchange into a call with a deadline.
//!
//! ```text
//! issue_query()
//!   │ 0. acquire slot            (window starts here)
//!   │ 1. register(kind)          → PendingQuery (entry in registry)
//!   │ 2. make(request_id)        → query event
//!   │ 3. publish(event)
//!   │ 4. timeout(wait)           ← ResponseListener::complete()
//!   │ 5. PendingQuery dropped    → entry removed, slot freed
//!   ▼
//! Result<QueryReply, BridgeError>
//! ```

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::metrics;
use crate::registry::CorrelationRegistry;
use crate::reply::QueryReply;
use shared_bus::{EventPublisher, QueryKind, SocialEvent};
use shared_types::RequestId;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, warn};

/// Issues cross-module queries and waits for their responses.
#[derive(Clone)]
pub struct QueryBridge {
    /// Pending queries, shared with the response listener
    registry: Arc<CorrelationRegistry>,
    /// Bus the query events go out on
    publisher: Arc<dyn EventPublisher>,
    /// How long to wait for any response
    timeout: Duration,
    /// Dispatch slots; bounds the queries and responses on the bus
    slots: Arc<Semaphore>,
}

impl QueryBridge {
    /// Create a bridge over a registry and a publisher.
    ///
    /// The registry must be the one the [`crate::ResponseListener`] completes.
    /// Clones share the same dispatch slots.
    pub fn new(
        registry: Arc<CorrelationRegistry>,
        publisher: Arc<dyn EventPublisher>,
        config: &BridgeConfig,
    ) -> Self {
        Self {
            registry,
            publisher,
            timeout: config.query_timeout,
            slots: Arc::new(Semaphore::new(config.max_in_flight.max(1))),
        }
    }

    /// The registry this bridge registers queries in.
    #[must_use]
    pub fn registry(&self) -> &Arc<CorrelationRegistry> {
        &self.registry
    }

    /// The response window.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Dispatch slots not currently taken.
    #[must_use]
    pub fn free_slots(&self) -> usize {
        self.slots.available_permits()
    }

    /// Publish a query and wait for its response.
    ///
    /// `make` receives the freshly registered request id and must build a
    /// query event of `kind` carrying it. `key` only appears in logs.
    ///
    /// The window covers waiting for a dispatch slot as well as waiting
    /// for the response, so no caller waits longer than the timeout.
    ///
    /// The registry entry is gone when this returns, on every path. If the
    /// returned future is dropped early the entry is removed as well.
    pub async fn issue_query<F>(
        &self,
        kind: QueryKind,
        key: &str,
        make: F,
    ) -> Result<QueryReply, BridgeError>
    where
        F: FnOnce(RequestId) -> SocialEvent + Send,
    {
        let deadline = Instant::now() + self.timeout;
        let _slot = match timeout_at(deadline, self.slots.acquire()).await {
            Ok(Ok(permit)) => permit,
            Ok(Err(_closed)) => return Err(BridgeError::Released { kind }),
            Err(_) => {
                self.registry.record_timeout();
                metrics::record_timeout(kind);
                warn!(
                    kind = %kind,
                    key = %key,
                    timeout_ms = self.timeout.as_millis(),
                    "Query timed out waiting for a dispatch slot, using fallback"
                );
                return Err(BridgeError::Timeout {
                    kind,
                    timeout: self.timeout,
                });
            }
        };

        let mut pending = self.registry.register(kind);
        let request_id = pending.request_id();

        let event = make(request_id);
        if event.is_response() || event.query_kind() != kind || event.request_id() != request_id {
            metrics::record_dispatch_failure(kind);
            error!(
                kind = %kind,
                key = %key,
                request_id = %request_id,
                built = %event.query_kind(),
                "Query factory built an event that cannot be correlated"
            );
            return Err(BridgeError::MalformedQuery {
                kind,
                actual: event.query_kind(),
            });
        }

        metrics::record_query_issued(kind);
        let receivers = self.publisher.publish(event).await;
        if receivers == 0 {
            metrics::record_dispatch_failure(kind);
            error!(
                kind = %kind,
                key = %key,
                request_id = %request_id,
                "Query reached no subscriber"
            );
            return Err(BridgeError::NoSubscribers { kind });
        }

        debug!(
            kind = %kind,
            key = %key,
            request_id = %request_id,
            receivers,
            "Query published, waiting for response"
        );

        match timeout_at(deadline, pending.wait()).await {
            Ok(Some(reply)) => Ok(reply),
            Ok(None) => Err(BridgeError::Released { kind }),
            Err(_) => {
                self.registry.record_timeout();
                metrics::record_timeout(kind);
                warn!(
                    kind = %kind,
                    key = %key,
                    request_id = %request_id,
                    timeout_ms = self.timeout.as_millis(),
                    "Query timed out, using fallback"
                );
                Err(BridgeError::Timeout {
                    kind,
                    timeout: self.timeout,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::ResponseListener;
    use shared_bus::{EventFilter, EventTopic, InMemoryEventBus};
    use shared_types::UserId;
    use std::time::Duration;
    use tokio::time::{sleep, Instant};

    fn setup(timeout_ms: u64) -> (Arc<InMemoryEventBus>, QueryBridge) {
        setup_with(BridgeConfig::with_timeout(Duration::from_millis(timeout_ms)))
    }

    fn setup_with(config: BridgeConfig) -> (Arc<InMemoryEventBus>, QueryBridge) {
        let bus = Arc::new(InMemoryEventBus::new());
        let registry = Arc::new(CorrelationRegistry::new());
        ResponseListener::new(bus.as_ref(), Arc::clone(&registry)).spawn();
        let bridge = QueryBridge::new(registry, bus.clone(), &config);
        (bus, bridge)
    }

    /// Answers every are-friends query after `delay` with `answer`.
    fn spawn_friend_responder(bus: Arc<InMemoryEventBus>, delay: Duration, answer: bool) {
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Social]));
        tokio::spawn(async move {
            while let Some(event) = sub.recv().await {
                if let SocialEvent::AreFriends { request_id, .. } = event {
                    sleep(delay).await;
                    bus.publish(SocialEvent::FriendshipChecked {
                        request_id,
                        result: Ok(answer),
                    })
                    .await;
                }
            }
        });
    }

    fn are_friends(request_id: RequestId) -> SocialEvent {
        SocialEvent::AreFriends {
            request_id,
            user_id: UserId::new(),
            other_id: UserId::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_trip() {
        let (bus, bridge) = setup(5000);
        spawn_friend_responder(bus, Duration::from_millis(10), true);

        let reply = bridge
            .issue_query(QueryKind::AreFriends, "a/b", are_friends)
            .await
            .unwrap();

        assert_eq!(reply, QueryReply::AreFriends(Ok(true)));
        assert_eq!(bridge.registry().pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_returns_error_after_window() {
        let (bus, bridge) = setup(5000);
        // The Social module listens but never answers
        let _silent = bus.subscribe(EventFilter::topics(vec![EventTopic::Social]));

        let started = Instant::now();
        let err = bridge
            .issue_query(QueryKind::AreFriends, "a/b", are_friends)
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert!(started.elapsed() >= Duration::from_millis(5000));
        assert!(started.elapsed() < Duration::from_millis(5100));
        assert_eq!(bridge.registry().pending_count(), 0);
        assert_eq!(
            bridge
                .registry()
                .stats()
                .total_timeouts
                .load(std::sync::atomic::Ordering::Relaxed),
            1
        );
    }

    #[tokio::test]
    async fn test_no_subscribers_is_dispatch_failure() {
        // The response listener alone does not make the query dispatched
        let (_bus, bridge) = setup(5000);

        let err = bridge
            .issue_query(QueryKind::AreFriends, "a/b", are_friends)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            BridgeError::NoSubscribers {
                kind: QueryKind::AreFriends
            }
        );
        assert_eq!(bridge.registry().pending_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_factory_is_rejected() {
        let (_bus, bridge) = setup(5000);

        let err = bridge
            .issue_query(QueryKind::GetUser, "x", are_friends)
            .await
            .unwrap_err();

        assert!(matches!(err, BridgeError::MalformedQuery { .. }));
        assert_eq!(bridge.registry().pending_count(), 0);
    }

    #[tokio::test]
    async fn test_foreign_request_id_is_rejected() {
        let (_bus, bridge) = setup(5000);

        let err = bridge
            .issue_query(QueryKind::AreFriends, "x", |_| are_friends(RequestId::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, BridgeError::MalformedQuery { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_call_releases_entry() {
        let (bus, bridge) = setup(5000);
        let _silent = bus.subscribe(EventFilter::topics(vec![EventTopic::Social]));

        let call = bridge.issue_query(QueryKind::AreFriends, "a/b", are_friends);
        let abandoned = tokio::time::timeout(Duration::from_millis(100), call).await;

        assert!(abandoned.is_err());
        assert_eq!(bridge.registry().pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_callers_beyond_cap_wait_for_a_slot() {
        let (bus, bridge) = setup_with(BridgeConfig::default().max_in_flight(2));
        spawn_friend_responder(bus, Duration::from_millis(10), true);

        let started = Instant::now();
        let calls = (0..6).map(|_| bridge.issue_query(QueryKind::AreFriends, "a/b", are_friends));
        let replies = futures::future::join_all(calls).await;

        assert!(replies
            .iter()
            .all(|reply| reply == &Ok(QueryReply::AreFriends(Ok(true)))));
        // Three rounds of two
        assert!(started.elapsed() >= Duration::from_millis(30));
        assert_eq!(bridge.free_slots(), 2);
        assert_eq!(bridge.registry().pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiting_for_a_slot_counts_against_the_window() {
        let (bus, bridge) = setup_with(
            BridgeConfig::with_timeout(Duration::from_millis(5000)).max_in_flight(1),
        );
        let _silent = bus.subscribe(EventFilter::topics(vec![EventTopic::Social]));

        let started = Instant::now();
        let (first, second) = tokio::join!(
            bridge.issue_query(QueryKind::AreFriends, "a/b", are_friends),
            bridge.issue_query(QueryKind::AreFriends, "c/d", are_friends),
        );

        assert!(first.unwrap_err().is_timeout());
        assert!(second.unwrap_err().is_timeout());
        assert!(started.elapsed() < Duration::from_millis(5100));
        assert_eq!(bridge.free_slots(), 1);
        assert_eq!(
            bridge
                .registry()
                .stats()
                .total_timeouts
                .load(std::sync::atomic::Ordering::Relaxed),
            2
        );
    }
}
