//! Adapters for the Chat module

pub mod memory;

pub use memory::InMemoryChatStore;
