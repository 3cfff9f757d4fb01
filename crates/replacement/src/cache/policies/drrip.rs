//! Dynamic Re-Reference Interval Prediction (DRRIP).
//!
//! Every block carries a 2-bit re-reference prediction value (RRPV). Position within
//! the set means nothing; the victim is the first block, in physical way order, whose
//! RRPV is distant. If no block is distant the whole set ages by one step and the scan
//! repeats.
//!
//! - **Hit:** RRPV becomes near-immediate (hit priority).
//! - **SRRIP insertion:** RRPV becomes long.
//! - **BRRIP insertion:** RRPV becomes distant, or long once per throttle period.
//! - **Invalidation:** RRPV becomes distant.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_hit()` / `on_insert()` / `on_invalidate()`: O(1)
//!   - `find_victim()`: O(W) per pass, at most 4 scans and 3 aging passes
//! - **Space Complexity:** 2 bits per block
//! - **Best Case:** Mixed workloads with scans interleaved into a reused working set

use tracing::trace;

use super::ReplacementPolicy;
use crate::cache::dueling::{BimodalThrottle, InsertionMode, PolicySelector, SetDueling};
use crate::cache::set::CacheSet;
use crate::common::constants::RRPV_MAX;
use crate::config::DuelingConfig;
use crate::stats::PolicyStats;

/// DRRIP policy state.
#[derive(Clone, Debug)]
pub struct DrripPolicy {
    dueling: SetDueling,
    throttle: BimodalThrottle,
    stats: PolicyStats,
}

impl DrripPolicy {
    /// Creates a DRRIP policy with a midpoint selector and a zeroed throttle.
    pub fn new(config: &DuelingConfig) -> Self {
        Self::with_parts(SetDueling::new(config), BimodalThrottle::new(config.eps_inverse))
    }

    /// Creates a DRRIP policy from existing dueling and throttle state.
    pub fn with_parts(dueling: SetDueling, throttle: BimodalThrottle) -> Self {
        Self {
            dueling,
            throttle,
            stats: PolicyStats::default(),
        }
    }

    /// Static insertion: long re-reference.
    fn insert_srrip(&mut self, set: &mut CacheSet, way: usize) {
        set.block_mut(way).rrpv.set_long();
        self.stats.high_priority_insertions += 1;
    }

    /// Bimodal insertion: long once per throttle period, distant otherwise.
    fn insert_brrip(&mut self, set: &mut CacheSet, way: usize) {
        let rrpv = &mut set.block_mut(way).rrpv;
        if self.throttle.should_insert_high_priority() {
            rrpv.set_long();
            self.stats.high_priority_insertions += 1;
        } else {
            rrpv.set_distant();
            self.stats.low_priority_insertions += 1;
        }
    }
}

impl ReplacementPolicy for DrripPolicy {
    fn on_hit(&mut self, set_index: usize, set: &mut CacheSet, way: usize) {
        set.block_mut(way).rrpv.set_near_immediate();
        self.stats.hits += 1;
        trace!(set = set_index, way, "hit priority, RRPV set to near-immediate");
    }

    fn on_insert(&mut self, set_index: usize, set: &mut CacheSet, way: usize) {
        let (role, mode) = self.dueling.select_insertion(set_index);
        self.stats.record_insertion(role);
        match mode {
            InsertionMode::Plain => self.insert_srrip(set, way),
            InsertionMode::Bimodal => self.insert_brrip(set, way),
        }
        trace!(
            set = set_index,
            way,
            ?role,
            ?mode,
            rrpv = set.block(way).rrpv.value(),
            "inserted block"
        );
    }

    fn on_invalidate(&mut self, set_index: usize, set: &mut CacheSet, way: usize) {
        set.block_mut(way).rrpv.set_distant();
        self.stats.invalidations += 1;
        trace!(set = set_index, way, "invalidated block, RRPV set to distant");
    }

    /// Returns the lowest way whose RRPV is distant, aging the set until one is.
    ///
    /// Each aging pass raises every non-distant RRPV by one, so after at most
    /// `RRPV_MAX` passes the block that started highest has become distant.
    fn find_victim(&mut self, set_index: usize, set: &mut CacheSet) -> usize {
        let mut passes: u8 = 0;
        loop {
            if let Some(way) = set.blocks().iter().position(|blk| blk.rrpv.is_distant()) {
                self.stats.victim_selections += 1;
                if set.block(way).valid {
                    trace!(
                        set = set_index,
                        way,
                        tag = set.block(way).tag,
                        passes,
                        "selecting block for replacement"
                    );
                }
                return way;
            }
            assert!(
                passes < RRPV_MAX,
                "set {set_index}: no distant block after {passes} aging passes"
            );
            for blk in set.blocks_mut() {
                blk.rrpv.increment();
            }
            passes += 1;
            self.stats.aging_passes += 1;
        }
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
