//! # User Service
//!
//! Implements [`UserApi`]. Local reads go to the [`UserDirectory`];
//! relationship questions go to the Social module through the query bridge.

use crate::domain::{validate_username, User};
use crate::error::{UserError, UsersResult};
use crate::ports::inbound::{ProfileView, UserApi};
use crate::ports::outbound::UserDirectory;
use async_trait::async_trait;
use query_bridge::SocialQueries;
use shared_types::{StoreError, UserId, UserSnapshot};
use std::sync::Arc;
use tracing::{info, warn};

/// User module service.
pub struct UserService {
    directory: Arc<dyn UserDirectory>,
    social: SocialQueries,
}

impl UserService {
    pub fn new(directory: Arc<dyn UserDirectory>, social: SocialQueries) -> Self {
        Self { directory, social }
    }

    fn require(&self, user_id: UserId) -> UsersResult<UserSnapshot> {
        self.directory
            .find_user(user_id)?
            .ok_or(UserError::NotFound(user_id))
    }
}

#[async_trait]
impl UserApi for UserService {
    async fn register_user(
        &self,
        username: &str,
        display_name: &str,
        avatar_url: Option<String>,
    ) -> UsersResult<UserSnapshot> {
        validate_username(username).map_err(|reason| UserError::InvalidUsername {
            username: username.to_string(),
            reason,
        })?;

        let display_name = match display_name.trim() {
            "" => username.to_string(),
            trimmed => trimmed.to_string(),
        };
        let user = User::new(username.to_string(), display_name, avatar_url);
        let snapshot = user.snapshot();

        self.directory.insert_user(user).map_err(|err| match err {
            StoreError::Rejected(_) => UserError::UsernameTaken(username.to_string()),
            other => UserError::Store(other),
        })?;

        info!(user_id = %snapshot.id, username = %snapshot.username, "[sa-01] Registered user");
        Ok(snapshot)
    }

    async fn get_user(&self, user_id: UserId) -> UsersResult<UserSnapshot> {
        self.require(user_id)
    }

    async fn view_profile(&self, viewer: UserId, target: UserId) -> UsersResult<ProfileView> {
        let user = self.require(target)?;

        if viewer == target {
            return Ok(ProfileView {
                user,
                is_self: true,
                is_friend: false,
                mutual_friends: 0,
            });
        }

        let (is_friend, mutual_friends) = tokio::join!(
            self.social.are_friends(viewer, target),
            self.social.count_mutual_friends(viewer, target),
        );

        Ok(ProfileView {
            user,
            is_self: false,
            is_friend,
            mutual_friends,
        })
    }

    async fn add_friend(&self, user_id: UserId, friend_id: UserId) -> UsersResult<bool> {
        if user_id == friend_id {
            return Err(UserError::SelfFriendship(user_id));
        }
        self.require(user_id)?;
        self.require(friend_id)?;

        let saved = self.social.save_friendship(user_id, friend_id).await;
        if saved {
            info!(user_id = %user_id, friend_id = %friend_id, "[sa-01] Friendship saved");
        } else {
            warn!(
                user_id = %user_id,
                friend_id = %friend_id,
                "[sa-01] Friendship not confirmed by Social module"
            );
        }
        Ok(saved)
    }
}
