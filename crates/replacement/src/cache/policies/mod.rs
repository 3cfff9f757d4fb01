//! Cache Replacement Policies.
//!
//! Implements the two set-dueling policy families. Each one decides where a block
//! lands on insertion, how a hit promotes it, how an invalidation demotes it, and
//! which block of a set to evict.
//!
//! # Policies
//!
//! - `Dip`: Dynamic Insertion Policy (LRU vs. bimodal insertion over a recency order).
//! - `Drrip`: Dynamic RRIP (static vs. bimodal insertion over per-block RRPVs).
//!
//! Both own their dueling state, so independent cache instances never share a
//! selector or throttle.

/// Dynamic Insertion Policy.
pub mod dip;

/// Dynamic Re-Reference Interval Prediction.
pub mod drrip;

pub use dip::DipPolicy;
pub use drrip::DrripPolicy;

use std::fmt;

use super::dueling::{BimodalThrottle, PolicySelector};
use super::set::CacheSet;
use crate::stats::PolicyStats;

/// Trait for set-dueling replacement policies.
///
/// Every method receives the index of the set it acts on together with that set's
/// storage. Passing a `way` that is not part of `set` is a caller bug and panics.
pub trait ReplacementPolicy: Send + Sync + fmt::Debug {
    /// Promotes a block after a hit.
    ///
    /// # Arguments
    ///
    /// * `set_index` - The cache set index.
    /// * `set` - Storage of that set.
    /// * `way` - The way that hit.
    fn on_hit(&mut self, set_index: usize, set: &mut CacheSet, way: usize);

    /// Places a freshly filled block and updates the duel.
    ///
    /// # Arguments
    ///
    /// * `set_index` - The cache set index; decides monitor or follower handling.
    /// * `set` - Storage of that set.
    /// * `way` - The way that was filled.
    fn on_insert(&mut self, set_index: usize, set: &mut CacheSet, way: usize);

    /// Demotes an invalidated block so it is evicted before any valid block.
    fn on_invalidate(&mut self, set_index: usize, set: &mut CacheSet, way: usize);

    /// Selects a victim way to evict from a set.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn find_victim(&mut self, set_index: usize, set: &mut CacheSet) -> usize;

    /// The policy selector shared by all sets of this cache.
    fn selector(&self) -> &PolicySelector;

    /// The bimodal insertion throttle.
    fn throttle(&self) -> &BimodalThrottle;

    /// Counters accumulated so far.
    fn stats(&self) -> &PolicyStats;
}
