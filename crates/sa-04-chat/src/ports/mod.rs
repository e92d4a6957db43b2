//! Ports for the Chat module

pub mod inbound;
pub mod outbound;

pub use inbound::ChatApi;
pub use outbound::ChatStore;
