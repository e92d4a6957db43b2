//! # Social Runtime Library
//!
//! Wiring for the social-activity backend. The binary in `main.rs` is a thin
//! shell around [`SocialRuntime`]; the integration tests build the same
//! runtime in process.
//!
//! ## Architectural Patterns
//!
//! - **EDA**: modules talk over the event bus only
//! - **Hexagonal Architecture**: each module exposes an inbound API trait and
//!   depends on outbound store traits, implemented in memory here
//! - **Query bridge**: cross-module reads are request/response pairs with a
//!   bounded wait and a per-query fallback

pub mod container;
pub mod demo;
pub mod runtime;

pub use container::{BusConfig, ConfigError, RuntimeConfig, ServiceContainer};
pub use runtime::SocialRuntime;
