//! Correlation Registry - maps request ids to waiting callers.
//!
//! Flow:
//! 1. The bridge calls `register()` and gets a [`PendingQuery`]
//! 2. The bridge publishes the query event carrying the request id
//! 3. The response listener calls `complete()` with the response payload
//! 4. The bridge awaits the pending query or times out
//! 5. Dropping the [`PendingQuery`] removes the entry if it is still there
//!
//! Completion removes the entry before sending, so at most one response can
//! ever reach a caller.

use crate::metrics;
use crate::reply::QueryReply;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shared_bus::QueryKind;
use shared_types::RequestId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::oneshot;
use tracing::debug;

/// An outstanding query waiting for its response.
struct PendingEntry {
    /// Channel to the waiting caller
    sender: oneshot::Sender<QueryReply>,
    /// Query kind, checked against the response
    kind: QueryKind,
    /// When the query was registered
    created_at: Instant,
}

/// Statistics for the correlation registry
#[derive(Debug, Default)]
pub struct RegistryStats {
    /// Total queries registered
    pub total_registered: AtomicU64,
    /// Total queries resolved by a response
    pub total_completed: AtomicU64,
    /// Total responses with no matching waiting caller
    pub total_discarded: AtomicU64,
    /// Total queries that timed out
    pub total_timeouts: AtomicU64,
    /// Total entries removed without a response
    pub total_released: AtomicU64,
}

impl RegistryStats {
    /// Snapshot of `(registered, completed, discarded, timeouts, released)`.
    #[must_use]
    pub fn snapshot(&self) -> (u64, u64, u64, u64, u64) {
        (
            self.total_registered.load(Ordering::Relaxed),
            self.total_completed.load(Ordering::Relaxed),
            self.total_discarded.load(Ordering::Relaxed),
            self.total_timeouts.load(Ordering::Relaxed),
            self.total_released.load(Ordering::Relaxed),
        )
    }
}

/// Thread-safe map from request id to pending completion handle.
#[derive(Default)]
pub struct CorrelationRegistry {
    /// Map of request ID to pending entry
    pending: DashMap<RequestId, PendingEntry>,
    /// Statistics
    stats: RegistryStats,
}

impl CorrelationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a request id and register a pending completion handle for it.
    ///
    /// The entry is in the map when this returns, so a response published
    /// any time afterwards finds it.
    pub fn register(&self, kind: QueryKind) -> PendingQuery<'_> {
        let (tx, rx) = oneshot::channel();
        let entry = PendingEntry {
            sender: tx,
            kind,
            created_at: Instant::now(),
        };

        let request_id = loop {
            let candidate = RequestId::new();
            match self.pending.entry(candidate) {
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                    break candidate;
                }
                // Mint another rather than clobber a live entry.
                Entry::Occupied(_) => continue,
            }
        };

        self.stats.total_registered.fetch_add(1, Ordering::Relaxed);
        metrics::set_in_flight(self.pending.len());

        debug!(request_id = %request_id, kind = %kind, "Registered pending query");

        PendingQuery {
            request_id,
            receiver: rx,
            registry: self,
        }
    }

    /// Resolve a pending query with a response payload.
    ///
    /// Returns true if a waiting caller received the payload. Unknown,
    /// expired, duplicate and mismatched responses return false and are
    /// otherwise ignored.
    pub fn complete(&self, request_id: RequestId, reply: QueryReply) -> bool {
        let kind = reply.kind();
        let Some((_, pending)) = self
            .pending
            .remove_if(&request_id, |_, pending| pending.kind == kind)
        else {
            self.stats.total_discarded.fetch_add(1, Ordering::Relaxed);
            metrics::record_response_discarded();
            debug!(
                request_id = %request_id,
                kind = %kind,
                "Discarding response for unknown, expired or mismatched request id"
            );
            return false;
        };
        metrics::set_in_flight(self.pending.len());

        let elapsed = pending.created_at.elapsed();
        if pending.sender.send(reply).is_err() {
            // Caller stopped waiting between removal and send
            self.stats.total_discarded.fetch_add(1, Ordering::Relaxed);
            metrics::record_response_discarded();
            debug!(request_id = %request_id, kind = %kind, "Pending query receiver dropped");
            return false;
        }

        self.stats.total_completed.fetch_add(1, Ordering::Relaxed);
        debug!(
            request_id = %request_id,
            kind = %kind,
            response_time_ms = elapsed.as_millis(),
            "Completed pending query"
        );
        true
    }

    /// Remove an entry without resolving it.
    ///
    /// Returns true if the entry was still registered.
    pub fn release(&self, request_id: &RequestId) -> bool {
        let removed = self.pending.remove(request_id).is_some();
        if removed {
            self.stats.total_released.fetch_add(1, Ordering::Relaxed);
            metrics::set_in_flight(self.pending.len());
        }
        removed
    }

    /// Count a query that gave up waiting.
    pub fn record_timeout(&self) {
        self.stats.total_timeouts.fetch_add(1, Ordering::Relaxed);
    }

    /// Get number of queries currently in flight
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Check if a request ID is pending
    #[must_use]
    pub fn is_pending(&self, request_id: &RequestId) -> bool {
        self.pending.contains_key(request_id)
    }

    /// Get statistics
    #[must_use]
    pub fn stats(&self) -> &RegistryStats {
        &self.stats
    }
}

/// The caller's side of a registered query.
///
/// Dropping it removes the registry entry, whatever path the caller took.
pub struct PendingQuery<'a> {
    request_id: RequestId,
    receiver: oneshot::Receiver<QueryReply>,
    registry: &'a CorrelationRegistry,
}

impl PendingQuery<'_> {
    /// The id the query event must carry.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Wait for the response.
    ///
    /// Returns `None` if the entry was removed without a response.
    pub async fn wait(&mut self) -> Option<QueryReply> {
        (&mut self.receiver).await.ok()
    }
}

impl Drop for PendingQuery<'_> {
    fn drop(&mut self) {
        self.registry.release(&self.request_id);
    }
}
