//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::User;
use shared_types::{StoreError, UserId, UserSnapshot};

/// Storage of registered users.
pub trait UserDirectory: Send + Sync {
    /// Snapshot of a user, `None` if unknown.
    fn find_user(&self, user_id: UserId) -> Result<Option<UserSnapshot>, StoreError>;

    /// Store a new user. Usernames are unique.
    fn insert_user(&self, user: User) -> Result<(), StoreError>;

    /// Look a user up by username.
    fn find_by_username(&self, username: &str) -> Result<Option<UserSnapshot>, StoreError>;

    /// Number of registered users.
    fn user_count(&self) -> usize;
}
