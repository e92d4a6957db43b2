//! Driving Ports (API - Inbound)

use crate::error::UsersResult;
use async_trait::async_trait;
use shared_types::{UserId, UserSnapshot};

/// A user's profile as seen by another user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    /// The profile owner.
    pub user: UserSnapshot,
    /// Viewer is looking at their own profile.
    pub is_self: bool,
    /// Viewer and owner are friends. `false` when the Social module is silent.
    pub is_friend: bool,
    /// Friends viewer and owner share. `0` when the Social module is silent.
    pub mutual_friends: u64,
}

/// Primary User API
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Register a new user.
    async fn register_user(
        &self,
        username: &str,
        display_name: &str,
        avatar_url: Option<String>,
    ) -> UsersResult<UserSnapshot>;

    /// Get a user by id.
    async fn get_user(&self, user_id: UserId) -> UsersResult<UserSnapshot>;

    /// Get `target`'s profile as `viewer` sees it.
    async fn view_profile(&self, viewer: UserId, target: UserId) -> UsersResult<ProfileView>;

    /// Record a friendship between two existing users.
    ///
    /// Returns whether the Social module confirmed it.
    async fn add_friend(&self, user_id: UserId, friend_id: UserId) -> UsersResult<bool>;
}
