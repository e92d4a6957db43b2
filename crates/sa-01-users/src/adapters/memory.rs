//! In-memory user directory.

use crate::domain::User;
use crate::ports::outbound::UserDirectory;
use parking_lot::RwLock;
use shared_types::{StoreError, UserId, UserSnapshot};
use std::collections::HashMap;
use tracing::debug;

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, User>,
    by_username: HashMap<String, UserId>,
}

/// User directory held in process memory.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    inner: RwLock<Inner>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn find_user(&self, user_id: UserId) -> Result<Option<UserSnapshot>, StoreError> {
        Ok(self.inner.read().users.get(&user_id).map(User::snapshot))
    }

    fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if inner.by_username.contains_key(&user.username) {
            return Err(StoreError::Rejected(format!(
                "username {} already registered",
                user.username
            )));
        }

        debug!(user_id = %user.id, username = %user.username, "Stored user");
        inner.by_username.insert(user.username.clone(), user.id);
        inner.users.insert(user.id, user);
        Ok(())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<UserSnapshot>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .by_username
            .get(username)
            .and_then(|id| inner.users.get(id))
            .map(User::snapshot))
    }

    fn user_count(&self) -> usize {
        self.inner.read().users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_find() {
        let directory = InMemoryUserDirectory::new();
        let user = User::new("alice".into(), "Alice".into(), None);
        let id = user.id;

        directory.insert_user(user).unwrap();

        assert_eq!(directory.find_user(id).unwrap().unwrap().username, "alice");
        assert_eq!(directory.find_by_username("alice").unwrap().unwrap().id, id);
        assert_eq!(directory.user_count(), 1);
    }

    #[test]
    fn test_unknown_user_is_none() {
        let directory = InMemoryUserDirectory::new();
        assert_eq!(directory.find_user(UserId::new()).unwrap(), None);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let directory = InMemoryUserDirectory::new();
        directory
            .insert_user(User::new("alice".into(), "Alice".into(), None))
            .unwrap();

        let err = directory
            .insert_user(User::new("alice".into(), "Other Alice".into(), None))
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
        assert_eq!(directory.user_count(), 1);
    }
}
