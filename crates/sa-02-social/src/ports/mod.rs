//! Ports for the Social module

pub mod inbound;
pub mod outbound;

pub use inbound::{FriendSuggestion, SocialApi};
pub use outbound::FriendshipStore;
