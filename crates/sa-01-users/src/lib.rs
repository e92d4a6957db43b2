//! # sa-01-users
//!
//! User module: owns user accounts and answers user lookups for every
//! other module.
//!
//! ## Architecture
//!
//! ```text
//! Social / Activity / Chat ──GetUser──→ Users (1) ──UserFetched──→ QueryResponses
//!
//! Users (1) ──AreFriends / CountMutualFriends / SaveFriendship──→ Social (2)
//! ```
//!
//! The module never links against another business module. Profile views
//! and friend requests reach the Social module through
//! [`query_bridge::SocialQueries`].
//!
//! ## Example
//!
//! ```rust,ignore
//! let directory = Arc::new(InMemoryUserDirectory::new());
//! UserQueryResponder::new(directory.clone(), bus.clone()).spawn();
//!
//! let service = UserService::new(directory, SocialQueries::new(bridge));
//! let alice = service.register_user("alice", "Alice", None).await?;
//! let profile = service.view_profile(bob.id, alice.id).await?;
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ipc;
pub mod ports;
pub mod service;

pub use adapters::InMemoryUserDirectory;
pub use domain::{validate_username, User, MAX_USERNAME_LEN};
pub use error::{UserError, UsersResult};
pub use ipc::UserQueryResponder;
pub use ports::{ProfileView, UserApi, UserDirectory};
pub use service::UserService;
