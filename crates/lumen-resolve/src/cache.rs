//! Advisory resolution cache.
//!
//! Memoizes resolver outcomes per call node. Keys carry the declaration-set
//! version, so entries written against a stale declaration set are never
//! served. Safe under concurrent independent passes; correctness never
//! depends on a hit.

use crate::candidate::ResolveOutcome;
use dashmap::DashMap;
use lumen_ast::NodeIndex;

pub struct ResolutionCache {
    entries: DashMap<(u64, NodeIndex), ResolveOutcome>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        ResolutionCache {
            entries: DashMap::new(),
        }
    }

    pub fn get(&self, version: u64, node: NodeIndex) -> Option<ResolveOutcome> {
        self.entries.get(&(version, node)).map(|e| e.clone())
    }

    pub fn insert(&self, version: u64, node: NodeIndex, outcome: ResolveOutcome) {
        self.entries.insert((version, node), outcome);
    }

    /// Drop every entry not written against `version`. Call after the
    /// declaration set changes.
    pub fn invalidate_except(&self, version: u64) {
        self.entries.retain(|&(v, _), _| v == version);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{Candidate, ResolveOutcome};
    use lumen_types::DeclId;
    use pretty_assertions::assert_eq;

    #[test]
    fn stale_versions_never_hit() {
        let cache = ResolutionCache::new();
        let node = NodeIndex(3);
        cache.insert(1, node, ResolveOutcome::best(Candidate::direct(DeclId(0))));
        assert!(cache.get(1, node).is_some());
        assert!(cache.get(2, node).is_none());
        cache.invalidate_except(2);
        assert!(cache.get(1, node).is_none());
        assert_eq!(cache.len(), 0);
    }
}
