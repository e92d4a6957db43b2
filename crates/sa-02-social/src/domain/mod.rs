//! # Friend Graph
//!
//! Undirected friendship graph. Every friendship is stored on both ends, so
//! `are_friends(a, b) == are_friends(b, a)` always holds.

use shared_types::UserId;
use std::collections::{BTreeSet, HashMap};

/// What saving a friendship did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The friendship is new.
    Created,
    /// The users were already friends; nothing changed.
    AlreadyFriends,
}

/// Adjacency sets keyed by user.
#[derive(Debug, Default, Clone)]
pub struct FriendGraph {
    edges: HashMap<UserId, BTreeSet<UserId>>,
}

impl FriendGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a friendship. Idempotent.
    ///
    /// Returns `None` for a self-friendship.
    pub fn add(&mut self, a: UserId, b: UserId) -> Option<SaveOutcome> {
        if a == b {
            return None;
        }
        let created = self.edges.entry(a).or_default().insert(b);
        self.edges.entry(b).or_default().insert(a);

        Some(if created {
            SaveOutcome::Created
        } else {
            SaveOutcome::AlreadyFriends
        })
    }

    /// Remove a friendship. Returns whether it existed.
    pub fn remove(&mut self, a: UserId, b: UserId) -> bool {
        let removed = self.edges.get_mut(&a).is_some_and(|set| set.remove(&b));
        if let Some(set) = self.edges.get_mut(&b) {
            set.remove(&a);
        }
        removed
    }

    pub fn are_friends(&self, a: UserId, b: UserId) -> bool {
        self.edges.get(&a).is_some_and(|set| set.contains(&b))
    }

    /// Friends `a` and `b` have in common.
    pub fn mutual_count(&self, a: UserId, b: UserId) -> u64 {
        match (self.edges.get(&a), self.edges.get(&b)) {
            (Some(left), Some(right)) => left.intersection(right).count() as u64,
            _ => 0,
        }
    }

    /// Friends of `a`, in id order.
    pub fn friends_of(&self, a: UserId) -> Vec<UserId> {
        self.edges
            .get(&a)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Friends of friends of `a` who are neither `a` nor already friends,
    /// with how many friends they share with `a`. Highest count first.
    pub fn suggestions(&self, a: UserId) -> Vec<(UserId, u64)> {
        let Some(direct) = self.edges.get(&a) else {
            return Vec::new();
        };

        let mut counts: HashMap<UserId, u64> = HashMap::new();
        for friend in direct {
            for candidate in self.edges.get(friend).into_iter().flatten() {
                if *candidate != a && !direct.contains(candidate) {
                    *counts.entry(*candidate).or_default() += 1;
                }
            }
        }

        let mut ranked: Vec<(UserId, u64)> = counts.into_iter().collect();
        ranked.sort_by(|(id_a, n_a), (id_b, n_b)| n_b.cmp(n_a).then(id_a.cmp(id_b)));
        ranked
    }
}
