//! # Shared Bus - Event Bus for Inter-Module Communication
//!
//! The User, Social, Activity and Chat modules never call each other
//! directly. Everything they need from one another travels over this bus.
//!
//! ## Request/Response over Pub/Sub
//!
//! ```text
//! ┌──────────────┐   GetUser{request_id}      ┌──────────────┐
//! │ Activity     │ ─────────┐                 │ Users        │
//! │              │          │                 │              │
//! └──────────────┘          ▼                 └──────────────┘
//!        ↑           ┌──────────────┐  subscribe()  │
//!        │           │  Event Bus   │ ←─────────────┘
//!        │           │              │  UserFetched{request_id}
//!        └────────── └──────────────┘
//!       QueryResponses topic
//! ```
//!
//! The bus itself is fire-and-forget. Correlating a response with the
//! waiting caller is the job of the `query-bridge` crate.
//!
//! ## Delivery
//!
//! - In-process only, nothing is persisted
//! - Bounded broadcast channel: a lagging subscriber skips events
//! - Filtering happens on the receiving side; `publish` reports how many
//!   subscriptions accept the event, so zero means no module listens

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{Answer, EventFilter, EventTopic, QueryKind, SocialEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription};

/// Maximum events to buffer per subscriber before a slow subscriber lags.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
