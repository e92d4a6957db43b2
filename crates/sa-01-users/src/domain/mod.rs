//! User domain entities and validation rules.

use chrono::{DateTime, Utc};
use shared_types::{Identified, UserId, UserSnapshot};

/// Longest accepted username.
pub const MAX_USERNAME_LEN: usize = 32;

/// A registered user as owned by the User module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user with a fresh id.
    pub fn new(username: String, display_name: String, avatar_url: Option<String>) -> Self {
        Self {
            id: UserId::new(),
            username,
            display_name,
            avatar_url,
            created_at: Utc::now(),
        }
    }

    /// Copy of the fields other modules may see.
    #[must_use]
    pub fn snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            id: self.id,
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

impl Identified for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

/// Check a username: 3 to 32 ASCII letters, digits, `_` or `.`.
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("shorter than 3 characters");
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err("longer than 32 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err("only letters, digits, '_' and '.' are allowed");
    }
    Ok(())
}
