//! Event bus handlers for the Chat module

pub mod handler;

pub use handler::ChatQueryResponder;
