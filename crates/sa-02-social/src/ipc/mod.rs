//! Event bus handlers for the Social module

pub mod handler;

pub use handler::SocialQueryResponder;
