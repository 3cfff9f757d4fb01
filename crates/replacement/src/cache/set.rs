//! Cache set storage.
//!
//! A set keeps its blocks in physical way order and, alongside them, a recency order
//! of way indices from most recently used (head) to least recently used (tail).
//! DRRIP only scans the physical order; DIP only reorders the recency order.

use super::rrpv::Rrpv;

/// One block slot of a set.
///
/// The replacement engine reads `valid` and owns `rrpv`; `tag` belongs to the
/// controller and is never interpreted here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheBlock {
    /// Address tag held by the block.
    pub tag: u64,
    /// Whether the block holds live data.
    pub valid: bool,
    /// Re-reference prediction value (DRRIP only).
    pub rrpv: Rrpv,
}

impl CacheBlock {
    /// Marks the block live for a newly written tag and resets its RRPV.
    pub const fn allocate(&mut self) {
        self.valid = true;
        self.rrpv = Rrpv::DISTANT;
    }
}

/// A set of `ways` block slots plus their recency order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSet {
    blocks: Vec<CacheBlock>,
    /// Way indices, MRU first and LRU last.
    order: Vec<usize>,
}

impl CacheSet {
    /// Creates a set of `ways` invalid blocks. Way 0 starts at the head.
    ///
    /// # Panics
    ///
    /// Panics if `ways` is 0.
    pub fn new(ways: usize) -> Self {
        assert!(ways > 0, "cache set must have at least one way");
        Self {
            blocks: vec![CacheBlock::default(); ways],
            order: (0..ways).collect(),
        }
    }

    /// Associativity of the set.
    pub fn ways(&self) -> usize {
        self.blocks.len()
    }

    /// Blocks in physical way order.
    pub fn blocks(&self) -> &[CacheBlock] {
        &self.blocks
    }

    /// Mutable blocks in physical way order.
    pub fn blocks_mut(&mut self) -> &mut [CacheBlock] {
        &mut self.blocks
    }

    /// Block at `way`.
    ///
    /// # Panics
    ///
    /// Panics if `way` is not a way of this set.
    pub fn block(&self, way: usize) -> &CacheBlock {
        self.check_way(way);
        &self.blocks[way]
    }

    /// Mutable block at `way`.
    ///
    /// # Panics
    ///
    /// Panics if `way` is not a way of this set.
    pub fn block_mut(&mut self, way: usize) -> &mut CacheBlock {
        self.check_way(way);
        &mut self.blocks[way]
    }

    /// Way indices from MRU to LRU.
    pub fn recency_order(&self) -> &[usize] {
        &self.order
    }

    /// Way at the MRU position.
    pub fn head(&self) -> usize {
        self.order[0]
    }

    /// Way at the LRU position.
    pub fn tail(&self) -> usize {
        self.order[self.order.len() - 1]
    }

    /// Moves `way` to the MRU position.
    ///
    /// # Panics
    ///
    /// Panics if `way` is not a way of this set.
    pub fn move_to_head(&mut self, way: usize) {
        let pos = self.position(way);
        let way = self.order.remove(pos);
        self.order.insert(0, way);
    }

    /// Moves `way` to the LRU position.
    ///
    /// # Panics
    ///
    /// Panics if `way` is not a way of this set.
    pub fn move_to_tail(&mut self, way: usize) {
        let pos = self.position(way);
        let way = self.order.remove(pos);
        self.order.push(way);
    }

    fn position(&self, way: usize) -> usize {
        self.check_way(way);
        match self.order.iter().position(|&w| w == way) {
            Some(pos) => pos,
            None => panic!("way {way} missing from recency order"),
        }
    }

    fn check_way(&self, way: usize) {
        assert!(
            way < self.blocks.len(),
            "way {way} does not belong to a {}-way set",
            self.blocks.len()
        );
    }
}
