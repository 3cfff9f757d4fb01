//! Address-driven reference controller.
//!
//! [`CacheSim`] owns a [`TagStore`] and does the controller's half of the work: it
//! splits addresses into set index and tag, detects hits by tag match, and on a miss
//! asks the policy for a victim and fills it. It models no data, latency, or
//! write-back; it exists to run address traces through the replacement policies.

use tracing::trace;

use super::{BlockId, TagStore};
use crate::common::error::ConfigError;
use crate::config::CacheConfig;

/// Result of one access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessOutcome {
    /// Whether the address was already resident.
    pub hit: bool,
    /// Line address of the valid block evicted to make room, if any.
    pub evicted: Option<u64>,
}

/// Set-associative cache model driving a replacement policy.
#[derive(Debug)]
pub struct CacheSim {
    tags: TagStore,
    line_bytes: usize,
    accesses: u64,
    misses: u64,
}

impl CacheSim {
    /// Creates a cache simulator with the specified configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration fails validation.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            tags: TagStore::new(config)?,
            line_bytes: config.line_bytes,
            accesses: 0,
            misses: 0,
        })
    }

    /// The underlying tag store.
    pub const fn tags(&self) -> &TagStore {
        &self.tags
    }

    /// Total accesses performed.
    pub const fn accesses(&self) -> u64 {
        self.accesses
    }

    /// Accesses that missed.
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Fraction of accesses that hit, or 0.0 before the first access.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            (self.accesses - self.misses) as f64 / self.accesses as f64
        }
    }

    /// Set index an address maps to.
    pub fn set_index(&self, addr: u64) -> usize {
        ((addr / self.line_bytes as u64) % self.tags.num_sets() as u64) as usize
    }

    fn tag(&self, addr: u64) -> u64 {
        addr / (self.line_bytes * self.tags.num_sets()) as u64
    }

    fn line_addr(&self, set_index: usize, tag: u64) -> u64 {
        (tag * self.tags.num_sets() as u64 + set_index as u64) * self.line_bytes as u64
    }

    fn lookup(&self, addr: u64) -> Option<BlockId> {
        let set_index = self.set_index(addr);
        let tag = self.tag(addr);
        self.tags
            .set(set_index)
            .blocks()
            .iter()
            .position(|blk| blk.valid && blk.tag == tag)
            .map(|way| BlockId::new(set_index, way))
    }

    /// Checks if the cache contains the specified address.
    pub fn contains(&self, addr: u64) -> bool {
        self.lookup(addr).is_some()
    }

    /// Accesses the cache for the specified address.
    ///
    /// A hit promotes the block. A miss evicts the policy's victim and installs the
    /// line in its place.
    pub fn access(&mut self, addr: u64) -> AccessOutcome {
        self.accesses += 1;

        if let Some(id) = self.lookup(addr) {
            self.tags.access_hit(id);
            return AccessOutcome {
                hit: true,
                evicted: None,
            };
        }

        self.misses += 1;
        let set_index = self.set_index(addr);
        let tag = self.tag(addr);
        let victim = self.tags.find_victim(set_index);

        let old = *self.tags.block(victim);
        let evicted = old.valid.then(|| self.line_addr(set_index, old.tag));
        trace!(addr, set = set_index, way = victim.way, ?evicted, "miss fill");

        self.tags.block_mut(victim).tag = tag;
        self.tags.insert(victim, true);

        AccessOutcome {
            hit: false,
            evicted,
        }
    }

    /// Invalidates the line holding `addr`.
    ///
    /// Returns `true` if the line was resident.
    pub fn invalidate(&mut self, addr: u64) -> bool {
        match self.lookup(addr) {
            Some(id) => {
                self.tags.invalidate(id);
                true
            }
            None => false,
        }
    }

    /// Invalidates every valid line.
    pub fn flush(&mut self) {
        for set_index in 0..self.tags.num_sets() {
            for way in 0..self.tags.ways() {
                let id = BlockId::new(set_index, way);
                if self.tags.block(id).valid {
                    self.tags.invalidate(id);
                }
            }
        }
    }
}
