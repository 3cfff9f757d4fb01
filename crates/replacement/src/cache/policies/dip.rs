//! Dynamic Insertion Policy (DIP).
//!
//! DIP keeps LRU's strict recency order and its eviction rule: the block at the LRU
//! position is the victim. It only changes where a newly filled block enters that
//! order. Plain LRU insertion puts it at MRU; bimodal insertion (BIP) puts it at LRU
//! except for one in every `eps_inverse` fills, which go to MRU. BIP keeps part of a
//! working set resident when the workload would otherwise thrash.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()` / `on_insert()` / `on_invalidate()`: O(W) where W is the associativity
//!   - `find_victim()`: O(1)
//! - **Best Case:** Working sets that fit, or cyclic scans slightly larger than the cache
//! - **Worst Case:** Phase changes faster than the selector can follow

use tracing::trace;

use super::ReplacementPolicy;
use crate::cache::dueling::{BimodalThrottle, InsertionMode, PolicySelector, SetDueling};
use crate::cache::set::CacheSet;
use crate::config::DuelingConfig;
use crate::stats::PolicyStats;

/// DIP policy state.
#[derive(Clone, Debug)]
pub struct DipPolicy {
    dueling: SetDueling,
    throttle: BimodalThrottle,
    stats: PolicyStats,
}

impl DipPolicy {
    /// Creates a DIP policy with a midpoint selector and a zeroed throttle.
    pub fn new(config: &DuelingConfig) -> Self {
        Self::with_parts(SetDueling::new(config), BimodalThrottle::new(config.eps_inverse))
    }

    /// Creates a DIP policy from existing dueling and throttle state.
    pub fn with_parts(dueling: SetDueling, throttle: BimodalThrottle) -> Self {
        Self {
            dueling,
            throttle,
            stats: PolicyStats::default(),
        }
    }

    /// LRU insertion: the new block becomes MRU.
    fn insert_lru(&mut self, set: &mut CacheSet, way: usize) {
        set.move_to_head(way);
        self.stats.high_priority_insertions += 1;
    }

    /// Bimodal insertion: MRU once per throttle period, LRU otherwise.
    fn insert_bip(&mut self, set: &mut CacheSet, way: usize) {
        if self.throttle.should_insert_high_priority() {
            set.move_to_head(way);
            self.stats.high_priority_insertions += 1;
        } else {
            set.move_to_tail(way);
            self.stats.low_priority_insertions += 1;
        }
    }
}

impl ReplacementPolicy for DipPolicy {
    /// Moves the hit block to MRU.
    fn on_hit(&mut self, set_index: usize, set: &mut CacheSet, way: usize) {
        set.move_to_head(way);
        self.stats.hits += 1;
        trace!(set = set_index, way, "moving block to MRU");
    }

    fn on_insert(&mut self, set_index: usize, set: &mut CacheSet, way: usize) {
        let (role, mode) = self.dueling.select_insertion(set_index);
        self.stats.record_insertion(role);
        match mode {
            InsertionMode::Plain => self.insert_lru(set, way),
            InsertionMode::Bimodal => self.insert_bip(set, way),
        }
        trace!(set = set_index, way, ?role, ?mode, head = set.head(), "inserted block");
    }

    /// Moves the invalidated block to LRU so it is the next victim.
    fn on_invalidate(&mut self, set_index: usize, set: &mut CacheSet, way: usize) {
        set.move_to_tail(way);
        self.stats.invalidations += 1;
        trace!(set = set_index, way, "invalidated block moved to LRU");
    }

    /// Returns the way at the LRU position.
    fn find_victim(&mut self, set_index: usize, set: &mut CacheSet) -> usize {
        let way = set.tail();
        self.stats.victim_selections += 1;
        if set.block(way).valid {
            trace!(set = set_index, way, tag = set.block(way).tag, "selecting block for replacement");
        }
        way
    }

    fn selector(&self) -> &PolicySelector {
        self.dueling.selector()
    }

    fn throttle(&self) -> &BimodalThrottle {
        &self.throttle
    }

    fn stats(&self) -> &PolicyStats {
        &self.stats
    }
}
