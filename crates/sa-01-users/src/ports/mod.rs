//! Ports for the User module

pub mod inbound;
pub mod outbound;

pub use inbound::{ProfileView, UserApi};
pub use outbound::UserDirectory;
