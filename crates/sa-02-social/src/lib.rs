//! # sa-02-social
//!
//! Social module: owns the friendship graph.
//!
//! ## Overview
//!
//! - **Relationship queries**: answers `AreFriends`, `CountMutualFriends` and
//!   `SaveFriendship` from other modules over the event bus
//! - **Friend lists**: friend ids are resolved to user snapshots through
//!   [`query_bridge::UserQueries`]
//! - **Suggestions**: friends of friends, ranked by mutual friend count
//!
//! ```text
//! Users / Activity ──AreFriends──→ Social (2) ──FriendshipChecked──→ QueryResponses
//! Social (2) ──GetUser──→ Users (1)
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ipc;
pub mod ports;
pub mod service;

pub use adapters::InMemoryFriendshipStore;
pub use domain::{FriendGraph, SaveOutcome};
pub use error::{SocialError, SocialResult};
pub use ipc::SocialQueryResponder;
pub use ports::{FriendSuggestion, FriendshipStore, SocialApi};
pub use service::SocialService;
