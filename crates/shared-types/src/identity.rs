//! # Uniform Identity
//!
//! Every record that crosses a module boundary exposes its identifier through
//! [`Identified`]. Filtering code (blocked users, deduplication) works on any
//! record through this one accessor.

use std::collections::HashSet;
use std::hash::Hash;

/// A record with a stable identifier.
pub trait Identified {
    /// Identifier type.
    type Id: Copy + Eq + Hash;

    /// The record's identifier.
    fn id(&self) -> Self::Id;
}

/// Drop every item whose identifier is in `excluded`, keeping order.
#[must_use]
pub fn exclude_by_id<T: Identified>(items: Vec<T>, excluded: &HashSet<T::Id>) -> Vec<T> {
    if excluded.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| !excluded.contains(&item.id()))
        .collect()
}

/// Distinct identifiers in first-seen order.
#[must_use]
pub fn distinct_ids<I, Id>(ids: I) -> Vec<Id>
where
    I: IntoIterator<Item = Id>,
    Id: Copy + Eq + Hash,
{
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
