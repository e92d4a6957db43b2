//! Event bus handlers for the User module

pub mod handler;

pub use handler::UserQueryResponder;
