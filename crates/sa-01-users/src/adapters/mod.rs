//! Adapters for the User module

pub mod memory;

pub use memory::InMemoryUserDirectory;
