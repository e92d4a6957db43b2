//! Adapters for the Social module

pub mod memory;

pub use memory::InMemoryFriendshipStore;
