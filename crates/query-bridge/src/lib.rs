//! # Query Bridge
//!
//! Synchronous-looking calls between modules that only share an event bus.
//!
//! A caller asks a typed façade (`UserQueries`, `SocialQueries`,
//! `ChatQueries`). The façade goes through [`QueryBridge::issue_query`], which
//! registers a one-shot handle under a fresh [`shared_types::RequestId`],
//! publishes the query event and waits a bounded time. The
//! [`ResponseListener`] completes the handle when the owning module's
//! response arrives.
//!
//! ## Guarantees
//!
//! - The registry entry exists before the query is published
//! - At most `max_in_flight` queries are on the bus at once; any number of
//!   callers may wait, each within its own window
//! - The entry is removed before the call returns, on every path
//! - A handle is resolved at most once; late and duplicate responses are dropped
//! - No answer never becomes an error, except for entity lookups, which
//!   fail loud with [`EntityNotFound`]
//!
//! ## Usage
//!
//! ```ignore
//! let registry = Arc::new(CorrelationRegistry::new());
//! ResponseListener::new(bus.as_ref(), registry.clone()).spawn();
//! let bridge = QueryBridge::new(registry, bus.clone(), &BridgeConfig::default());
//!
//! let social = SocialQueries::new(bridge.clone());
//! if social.are_friends(alice, bob).await { /* ... */ }
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod bridge;
pub mod config;
pub mod error;
pub mod facades;
pub mod hydration;
pub mod listener;
pub mod metrics;
pub mod registry;
pub mod reply;

#[cfg(test)]
pub(crate) mod test_support;

pub use bridge::QueryBridge;
pub use config::{BridgeConfig, DEFAULT_MAX_IN_FLIGHT, DEFAULT_QUERY_TIMEOUT_MS};
pub use error::{BridgeError, ConfigError, EntityNotFound, NotFoundReason};
pub use facades::{ChatQueries, SocialQueries, UserQueries};
pub use hydration::ChatMessageHydrator;
pub use listener::ResponseListener;
pub use registry::{CorrelationRegistry, PendingQuery, RegistryStats};
pub use reply::QueryReply;
