//! Adapters for the Activity module

pub mod memory;

pub use memory::{InMemoryActivityStore, InMemoryBlockList};
