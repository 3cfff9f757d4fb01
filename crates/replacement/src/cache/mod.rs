//! Set-Associative Tag Store.
//!
//! This module connects the replacement policies to a cache's block storage. A cache
//! controller detects hits and misses and moves data; it calls into [`TagStore`]
//! through four entry points:
//!
//! 1. [`TagStore::access_hit`]: a lookup hit a block.
//! 2. [`TagStore::find_victim`]: a miss needs a way to fill.
//! 3. [`TagStore::insert`]: a way was filled.
//! 4. [`TagStore::invalidate`]: a block was dropped.
//!
//! [`CacheSim`] is a small address-driven controller built on top of it.

/// Set-dueling machinery shared by the policies (classifier, selector, throttle).
pub mod dueling;

/// Replacement policy implementations (DIP, DRRIP).
pub mod policies;

/// Re-reference prediction value counter.
pub mod rrpv;

/// Block and set storage.
pub mod set;

/// Address-driven reference controller.
pub mod sim;

pub use self::set::{CacheBlock, CacheSet};
pub use self::sim::{AccessOutcome, CacheSim};

use tracing::debug;

use self::policies::{DipPolicy, DrripPolicy, ReplacementPolicy};
use crate::common::error::ConfigError;
use crate::config::{CacheConfig, ReplacementPolicy as PolicyType};
use crate::stats::PolicyStats;

/// Handle naming one block slot: a set index and a way within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockId {
    /// Set index.
    pub set: usize,
    /// Way within the set.
    pub way: usize,
}

impl BlockId {
    /// Creates a handle for `way` of `set`.
    pub const fn new(set: usize, way: usize) -> Self {
        Self { set, way }
    }
}

/// Tag store driving one replacement policy over a cache's sets.
///
/// All dueling state (selector, throttle) belongs to this instance; two tag stores
/// never influence each other. The store is not internally synchronized: a controller
/// sharing it between cores must serialize calls.
#[derive(Debug)]
pub struct TagStore {
    sets: Vec<CacheSet>,
    policy: Box<dyn ReplacementPolicy>,
}

impl TagStore {
    /// Creates a tag store with the configured geometry and policy.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration fails validation.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let policy: Box<dyn ReplacementPolicy> = match config.policy {
            PolicyType::Dip => Box::new(DipPolicy::new(&config.dueling)),
            PolicyType::Drrip => Box::new(DrripPolicy::new(&config.dueling)),
        };
        debug!(
            sets = config.num_sets(),
            ways = config.ways,
            policy = ?config.policy,
            "building tag store"
        );
        Ok(Self::with_policy(config.num_sets(), config.ways, policy))
    }

    /// Creates a tag store around an already constructed policy.
    ///
    /// # Panics
    ///
    /// Panics if `sets` or `ways` is 0.
    pub fn with_policy(sets: usize, ways: usize, policy: Box<dyn ReplacementPolicy>) -> Self {
        assert!(sets > 0, "tag store must have at least one set");
        Self {
            sets: (0..sets).map(|_| CacheSet::new(ways)).collect(),
            policy,
        }
    }

    /// Number of sets.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Associativity.
    pub fn ways(&self) -> usize {
        self.sets[0].ways()
    }

    /// Storage of set `set_index`.
    ///
    /// # Panics
    ///
    /// Panics if `set_index` is out of range.
    pub fn set(&self, set_index: usize) -> &CacheSet {
        self.check_set(set_index);
        &self.sets[set_index]
    }

    /// The block named by `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not name a block of this store.
    pub fn block(&self, id: BlockId) -> &CacheBlock {
        self.set(id.set).block(id.way)
    }

    /// Mutable access to the block named by `id`, for controller-owned fields.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not name a block of this store.
    pub fn block_mut(&mut self, id: BlockId) -> &mut CacheBlock {
        self.check_set(id.set);
        self.sets[id.set].block_mut(id.way)
    }

    /// The active replacement policy.
    pub fn policy(&self) -> &dyn ReplacementPolicy {
        self.policy.as_ref()
    }

    /// Counters of the active policy.
    pub fn stats(&self) -> &PolicyStats {
        self.policy.stats()
    }

    /// Reports a hit on `id`.
    pub fn access_hit(&mut self, id: BlockId) {
        self.check_set(id.set);
        self.policy.on_hit(id.set, &mut self.sets[id.set], id.way);
    }

    /// Reports that `id` was filled.
    ///
    /// The controller writes the new tag through [`TagStore::block_mut`] first. A
    /// new allocation marks the block valid and resets its re-reference state before
    /// the policy places it; a refill of a block that already holds the address keeps
    /// its state. Both count as a miss for set dueling.
    pub fn insert(&mut self, id: BlockId, is_new_allocation: bool) {
        self.check_set(id.set);
        let set = &mut self.sets[id.set];
        if is_new_allocation {
            set.block_mut(id.way).allocate();
        }
        self.policy.on_insert(id.set, set, id.way);
    }

    /// Selects the block to evict from `set_index`.
    pub fn find_victim(&mut self, set_index: usize) -> BlockId {
        self.check_set(set_index);
        let way = self.policy.find_victim(set_index, &mut self.sets[set_index]);
        BlockId::new(set_index, way)
    }

    /// Invalidates `id` and demotes it ahead of every valid block.
    pub fn invalidate(&mut self, id: BlockId) {
        self.check_set(id.set);
        let set = &mut self.sets[id.set];
        set.block_mut(id.way).valid = false;
        self.policy.on_invalidate(id.set, set, id.way);
    }

    fn check_set(&self, set_index: usize) {
        assert!(
            set_index < self.sets.len(),
            "set {set_index} out of range for {} sets",
            self.sets.len()
        );
    }
}
