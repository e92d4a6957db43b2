//! Ports for the Activity module

pub mod inbound;
pub mod outbound;

pub use inbound::ActivityApi;
pub use outbound::{ActivityStore, BlockList};
