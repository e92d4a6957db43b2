//! # sa-04-chat
//!
//! Chat module: one chat room per activity.
//!
//! ## Overview
//!
//! - **Rooms**: post, like and unlike messages
//! - **Message queries**: answers `GetMessageIds`, `GetMessageIdsBatch` and
//!   `GetFullMessages` over the event bus
//! - **Identifiers only**: stored messages reference users by id; senders are
//!   checked and cards are hydrated through the User module
//!
//! ```text
//! Activity ──GetFullMessages / GetMessageIdsBatch──→ Chat (4) ──→ QueryResponses
//! Chat (4) ──GetUser──→ Users (1)
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ipc;
pub mod ports;
pub mod service;

pub use adapters::InMemoryChatStore;
pub use domain::{validate_content, ChatRoom, MAX_MESSAGE_LEN};
pub use error::{ChatError, ChatResult};
pub use ipc::ChatQueryResponder;
pub use ports::{ChatApi, ChatStore};
pub use service::ChatService;
