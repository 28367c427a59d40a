//! Memoised layout results.
//!
//! Results are keyed by a fingerprint of everything that affects them: the
//! program, the boundary, the layout options and a caller-supplied style
//! key. The style key is never interpreted here.

use indexmap::IndexMap;
use spaceplan_core::{BoundaryRect, LayoutError, RoomRecord, SpaceProgram};
use tracing::trace;

use crate::config::LayoutConfig;
use crate::engine::LayoutEngine;

/// Default number of cached layouts.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Current number of entries
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Fingerprint of a layout request.
pub fn fingerprint(
    program: &SpaceProgram,
    boundary: BoundaryRect,
    config: &LayoutConfig,
    style: &str,
) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();

    hasher.update(config.strategy.name().as_bytes());
    hasher.update(&config.max_depth.to_le_bytes());
    hasher.update(&config.vertical_tolerance.to_bits().to_le_bytes());
    for value in [boundary.x, boundary.y, boundary.width, boundary.height] {
        hasher.update(&value.to_bits().to_le_bytes());
    }
    update_str(&mut hasher, style);

    hasher.update(&program.root().map_or(u64::MAX, |id| id.0).to_le_bytes());
    for node in program.nodes() {
        hasher.update(&node.id.0.to_le_bytes());
        update_str(&mut hasher, &node.name);
        match &node.kind {
            Some(kind) => {
                hasher.update(&[1]);
                update_str(&mut hasher, kind);
            }
            None => {
                hasher.update(&[0]);
            }
        }
        hasher.update(&node.area.to_bits().to_le_bytes());
        hasher.update(&node.angle.to_bits().to_le_bytes());
        hasher.update(&[u8::from(node.is_final)]);
        hasher.update(&(node.children.len() as u64).to_le_bytes());
        for child in &node.children {
            hasher.update(&child.0.to_le_bytes());
        }
    }

    hasher.finalize()
}

// Length prefix keeps ("ab", "c") and ("a", "bc") apart.
fn update_str(hasher: &mut blake3::Hasher, s: &str) {
    hasher.update(&(s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

/// Bounded cache of layout results, evicting the oldest entry when full.
#[derive(Debug)]
pub struct LayoutCache {
    entries: IndexMap<blake3::Hash, Vec<RoomRecord>>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl LayoutCache {
    /// Create a cache holding at most `capacity` layouts (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: IndexMap::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached layout for this request, computing and storing it
    /// on a miss. Failed layouts are not cached.
    pub fn get_or_compute(
        &mut self,
        engine: &LayoutEngine,
        program: &SpaceProgram,
        boundary: BoundaryRect,
        style: &str,
    ) -> Result<Vec<RoomRecord>, LayoutError> {
        let key = fingerprint(program, boundary, engine.config(), style);

        if let Some(rooms) = self.entries.get(&key) {
            self.hits += 1;
            trace!(key = %key.to_hex(), "layout cache hit");
            return Ok(rooms.clone());
        }

        self.misses += 1;
        let rooms = engine.layout(program, boundary)?;
        if self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(key, rooms.clone());
        Ok(rooms)
    }

    pub fn contains(&self, key: &blake3::Hash) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutStrategy;
    use spaceplan_core::{SpaceNode, SpaceNodeId};

    fn program() -> SpaceProgram {
        SpaceProgram::from_node(&SpaceNode::split(
            "root",
            100.0,
            0.0,
            vec![SpaceNode::room("a", 40.0), SpaceNode::room("b", 60.0)],
        ))
    }

    const RECT: BoundaryRect = BoundaryRect::new(0.0, 0.0, 10.0, 10.0);

    #[test]
    fn test_fingerprint_sensitivity() {
        let config = LayoutConfig::default();
        let base = fingerprint(&program(), RECT, &config, "");

        assert_eq!(base, fingerprint(&program(), RECT, &config, ""));
        assert_ne!(base, fingerprint(&program(), RECT, &config, "dark"));
        let taller = BoundaryRect::new(0.0, 0.0, 10.0, 11.0);
        assert_ne!(base, fingerprint(&program(), taller, &config, ""));
        let bisect = config.clone().with_strategy(LayoutStrategy::Bisect);
        assert_ne!(base, fingerprint(&program(), RECT, &bisect, ""));

        let changed = SpaceProgram::from_node(&SpaceNode::split(
            "root",
            100.0,
            0.0,
            vec![SpaceNode::room("a", 41.0), SpaceNode::room("b", 60.0)],
        ));
        assert_ne!(base, fingerprint(&changed, RECT, &config, ""));
    }

    #[test]
    fn test_hits_and_misses() {
        let engine = LayoutEngine::default();
        let mut cache = LayoutCache::new(4);

        let first = cache.get_or_compute(&engine, &program(), RECT, "").unwrap();
        let second = cache.get_or_compute(&engine, &program(), RECT, "").unwrap();
        assert_eq!(first, second);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert!((stats.hit_rate() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_oldest_entry_evicted() {
        let engine = LayoutEngine::default();
        let mut cache = LayoutCache::new(2);
        let config = engine.config().clone();

        for style in ["a", "b", "c"] {
            cache.get_or_compute(&engine, &program(), RECT, style).unwrap();
        }
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&fingerprint(&program(), RECT, &config, "a")));
        assert!(cache.contains(&fingerprint(&program(), RECT, &config, "c")));
    }

    #[test]
    fn test_errors_not_cached() {
        let engine = LayoutEngine::default();
        let mut cache = LayoutCache::default();
        let mut cyclic = program();
        cyclic.link_child(SpaceNodeId(1), SpaceNodeId(0));

        assert!(cache.get_or_compute(&engine, &cyclic, RECT, "").is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }
}
