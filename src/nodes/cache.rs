//! Cook cache: per-node entries guarded by a validity fingerprint
//!
//! The fingerprint is a two-level revision scheme (graph topology revision
//! plus per-node parameter revisions) used in place of a content hash. It is
//! cheaper per cook and less precise: an edit that restores an old value still
//! reads as a change.

use crate::geometry::Geometry;
use crate::nodes::NodeId;
use std::collections::HashMap;
use std::sync::Arc;

/// Everything a cached result depends on, observed at cook time
#[derive(Debug, Clone)]
pub struct Fingerprint {
    pub topology_revision: u64,
    pub param_revision: u64,
    /// Direct input sources, in slot order
    pub input_ids: Vec<NodeId>,
    /// Parameter revisions of `input_ids`, positionally aligned
    pub input_param_revisions: Vec<u64>,
    /// The geometry each input resolved to. Compared by pointer, so a recooked
    /// input invalidates this entry even when its revisions did not move.
    pub input_geometries: Vec<Arc<Geometry>>,
}

impl PartialEq for Fingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.topology_revision == other.topology_revision
            && self.param_revision == other.param_revision
            && self.input_ids == other.input_ids
            && self.input_param_revisions == other.input_param_revisions
            && self.input_geometries.len() == other.input_geometries.len()
            && self
                .input_geometries
                .iter()
                .zip(&other.input_geometries)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl Eq for Fingerprint {}

/// A memoized cook result
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub geometry: Arc<Geometry>,
    pub fingerprint: Fingerprint,
}

/// Counters describing cache behaviour
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStatistics {
    /// Entries currently stored
    pub total_entries: usize,
    pub cache_hits: usize,
    /// Lookups that found no entry or a stale one
    pub cache_misses: usize,
    /// Successful cook calls
    pub cooks: usize,
    /// Cook calls that returned an error
    pub failures: usize,
    /// Entries dropped by `invalidate` or `clear`
    pub cache_invalidations: usize,
}

impl CacheStatistics {
    /// Calculate cache hit ratio
    pub fn hit_ratio(&self) -> f32 {
        let total_accesses = self.cache_hits + self.cache_misses;
        if total_accesses == 0 {
            0.0
        } else {
            self.cache_hits as f32 / total_accesses as f32
        }
    }
}

/// Node id -> cache entry map with optional statistics
#[derive(Debug)]
pub struct NodeCache {
    entries: HashMap<NodeId, CacheEntry>,
    stats: CacheStatistics,
    track_statistics: bool,
}

impl NodeCache {
    pub fn new(track_statistics: bool) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStatistics::default(),
            track_statistics,
        }
    }

    /// Return the stored geometry if its fingerprint matches `fingerprint`
    pub fn lookup(&mut self, node_id: NodeId, fingerprint: &Fingerprint) -> Option<Arc<Geometry>> {
        let hit = self
            .entries
            .get(&node_id)
            .filter(|entry| entry.fingerprint == *fingerprint)
            .map(|entry| Arc::clone(&entry.geometry));

        if self.track_statistics {
            if hit.is_some() {
                self.stats.cache_hits += 1;
            } else {
                self.stats.cache_misses += 1;
            }
        }
        hit
    }

    /// Store or overwrite the entry for `node_id`
    pub fn insert(&mut self, node_id: NodeId, entry: CacheEntry) {
        self.entries.insert(node_id, entry);
        if self.track_statistics {
            self.stats.cooks += 1;
            self.stats.total_entries = self.entries.len();
        }
    }

    pub fn record_failure(&mut self) {
        if self.track_statistics {
            self.stats.failures += 1;
        }
    }

    /// Stored geometry without checking validity
    pub fn peek(&self, node_id: NodeId) -> Option<Arc<Geometry>> {
        self.entries
            .get(&node_id)
            .map(|entry| Arc::clone(&entry.geometry))
    }

    pub fn get(&self, node_id: NodeId) -> Option<&CacheEntry> {
        self.entries.get(&node_id)
    }

    /// Drop one entry
    pub fn invalidate(&mut self, node_id: NodeId) -> bool {
        let removed = self.entries.remove(&node_id).is_some();
        if removed && self.track_statistics {
            self.stats.cache_invalidations += 1;
            self.stats.total_entries = self.entries.len();
        }
        removed
    }

    /// Clear all cache entries
    pub fn clear(&mut self) {
        let removed_count = self.entries.len();
        self.entries.clear();

        if self.track_statistics {
            self.stats.cache_invalidations += removed_count;
            self.stats.total_entries = 0;
        }
    }

    pub fn statistics(&self) -> &CacheStatistics {
        &self.stats
    }

    /// Reset counters, keeping the entry count
    pub fn reset_statistics(&mut self) {
        self.stats = CacheStatistics {
            total_entries: self.entries.len(),
            ..CacheStatistics::default()
        };
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NodeCache {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fingerprint(param_revision: u64, inputs: Vec<Arc<Geometry>>) -> Fingerprint {
        Fingerprint {
            topology_revision: 3,
            param_revision,
            input_ids: (1..=inputs.len()).collect(),
            input_param_revisions: vec![1; inputs.len()],
            input_geometries: inputs,
        }
    }

    #[test]
    fn test_fingerprint_compares_inputs_by_identity() {
        let a = Arc::new(Geometry::empty());
        let b = Arc::new(Geometry::empty());
        assert_eq!(*a, *b);

        assert_eq!(fingerprint(1, vec![a.clone()]), fingerprint(1, vec![a.clone()]));
        assert_ne!(fingerprint(1, vec![a.clone()]), fingerprint(1, vec![b]));
        assert_ne!(fingerprint(1, vec![a.clone()]), fingerprint(2, vec![a]));
    }

    #[test]
    fn test_lookup_hit_and_miss() {
        let mut cache = NodeCache::new(true);
        let geometry = Arc::new(Geometry::empty());
        let key = fingerprint(1, vec![]);

        assert!(cache.lookup(7, &key).is_none());
        cache.insert(
            7,
            CacheEntry {
                geometry: geometry.clone(),
                fingerprint: key.clone(),
            },
        );

        let hit = cache.lookup(7, &key).unwrap();
        assert!(Arc::ptr_eq(&hit, &geometry));
        assert!(cache.lookup(7, &fingerprint(2, vec![])).is_none());

        let stats = cache.statistics();
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.cache_misses, 2);
        assert_eq!(stats.cooks, 1);
        assert!((stats.hit_ratio() - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let mut cache = NodeCache::new(true);
        for id in 1..=3 {
            cache.insert(
                id,
                CacheEntry {
                    geometry: Arc::new(Geometry::empty()),
                    fingerprint: fingerprint(1, vec![]),
                },
            );
        }
        assert!(cache.invalidate(2));
        assert!(!cache.invalidate(2));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.statistics().cache_invalidations, 3);
        assert_eq!(cache.statistics().total_entries, 0);

        cache.reset_statistics();
        assert_eq!(cache.statistics(), &CacheStatistics::default());
    }

    #[test]
    fn test_statistics_can_be_disabled() {
        let mut cache = NodeCache::new(false);
        let key = fingerprint(1, vec![]);
        cache.lookup(1, &key);
        cache.insert(
            1,
            CacheEntry {
                geometry: Arc::new(Geometry::empty()),
                fingerprint: key,
            },
        );
        assert_eq!(cache.statistics(), &CacheStatistics::default());
        assert_eq!(cache.len(), 1);
    }
}
