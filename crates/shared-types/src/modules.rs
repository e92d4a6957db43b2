//! # Module Identifiers
//!
//! The business modules that share the bus. Used as the event source tag
//! and in log fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A business module of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleId {
    /// Users and their profiles.
    Users,
    /// Friendships.
    Social,
    /// Activities and their feeds.
    Activity,
    /// Activity chat rooms.
    Chat,
    /// Process wiring and tooling.
    Runtime,
}

impl ModuleId {
    /// Stable lowercase name for logs and metric labels.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Social => "social",
            Self::Activity => "activity",
            Self::Chat => "chat",
            Self::Runtime => "runtime",
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
