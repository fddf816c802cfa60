//! Overlapped-edge view and its bounded memo cache.
//!
//! Renderers fan out multiple edges between the same node pair; the grouping
//! is recomputed per distinct query of node-id sets and memoized. The cache
//! exists purely as an optimization: it is cleared wholesale whenever any
//! edge is added or removed, and lookups are cheap to recompute on a miss.

use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::edge::Edge;

/// All edges between one unordered pair of nodes, split by direction.
///
/// `source` is the first-seen node of the pair for the query that produced
/// this group; `outgoing` holds the edges directed source→target and
/// `incoming` the edges directed target→source.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlappedEdges {
    pub source: String,
    pub target: String,
    pub outgoing: Vec<Edge>,
    pub incoming: Vec<Edge>,
}

impl OverlappedEdges {
    pub(in crate::graph) fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.len() + self.incoming.len()
    }
}

pub(in crate::graph) const OVERLAP_CACHE_CAPACITY: usize = 100;

type CacheMap = IndexMap<String, Arc<Vec<OverlappedEdges>>, FxBuildHasher>;

/// Fixed-capacity least-recently-used store, keyed by the sorted,
/// `-`-joined node ids of a query.
///
/// The map keeps entries in access order: hits are re-inserted at the back,
/// eviction pops the front. The `Mutex` only protects the store itself so
/// concurrent readers racing a population (or a write-triggered clear) at
/// worst recompute; they never observe stale groups.
#[derive(Debug)]
pub(in crate::graph) struct OverlapCache {
    capacity: usize,
    entries: Mutex<CacheMap>,
}

impl OverlapCache {
    pub(in crate::graph) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(CacheMap::default()),
        }
    }

    pub(in crate::graph) fn key(ids: &[&str]) -> String {
        let mut sorted: Vec<&str> = ids.to_vec();
        sorted.sort_unstable();
        sorted.join("-")
    }

    pub(in crate::graph) fn get(&self, key: &str) -> Option<Arc<Vec<OverlappedEdges>>> {
        let mut entries = self.lock();
        let value = entries.shift_remove(key)?;
        entries.insert(key.to_string(), value.clone());
        Some(value)
    }

    pub(in crate::graph) fn insert(&self, key: String, value: Arc<Vec<OverlappedEdges>>) {
        let mut entries = self.lock();
        if entries.shift_remove(&key).is_none() && entries.len() >= self.capacity {
            entries.shift_remove_index(0);
        }
        entries.insert(key, value);
    }

    pub(in crate::graph) fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheMap> {
        // A poisoned lock only means a panic happened mid-access; the map
        // itself is still structurally sound.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tag: &str) -> Arc<Vec<OverlappedEdges>> {
        Arc::new(vec![OverlappedEdges::new(tag, tag)])
    }

    #[test]
    fn key_is_sorted_and_joined() {
        assert_eq!(OverlapCache::key(&["b", "a", "c"]), "a-b-c");
        assert_eq!(OverlapCache::key(&["a", "b"]), OverlapCache::key(&["b", "a"]));
    }

    #[test]
    fn evicts_least_recently_used_at_capacity() {
        let cache = OverlapCache::new(2);
        cache.insert("a".into(), entry("a"));
        cache.insert("b".into(), entry("b"));

        // Touch "a" so "b" becomes the eviction candidate.
        assert!(cache.get("a").is_some());
        cache.insert("c".into(), entry("c"));

        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn reinserting_an_existing_key_does_not_evict() {
        let cache = OverlapCache::new(2);
        cache.insert("a".into(), entry("a"));
        cache.insert("b".into(), entry("b"));
        cache.insert("b".into(), entry("b2"));

        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_some());
    }

    #[test]
    fn clear_empties_the_store() {
        let cache = OverlapCache::new(2);
        cache.insert("a".into(), entry("a"));
        cache.clear();
        assert!(cache.get("a").is_none());
    }
}
