//! Re-Reference Prediction Value (RRPV).
//!
//! A 2-bit saturating counter stored with every block under the DRRIP policy. It
//! estimates how soon the block will be referenced again; a higher value means a
//! more distant re-reference and therefore a better eviction candidate.
//!
//! | Value | Meaning                    |
//! |-------|----------------------------|
//! | 0     | Near-immediate re-reference |
//! | 1     | Short re-reference         |
//! | 2     | Long re-reference          |
//! | 3     | Distant re-reference       |
//!
//! The value only rises through [`Rrpv::increment`]; every other change is an
//! explicit reset by a policy action.

use std::fmt;

use crate::common::constants::RRPV_MAX;

/// 2-bit re-reference prediction counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rrpv(u8);

impl Rrpv {
    /// Block expected to be re-referenced almost immediately.
    pub const NEAR_IMMEDIATE: Self = Self(0);
    /// Block expected to be re-referenced soon.
    pub const SHORT: Self = Self(1);
    /// Block expected to be re-referenced in a long while.
    pub const LONG: Self = Self(2);
    /// Block not expected to be re-referenced; eligible for eviction.
    pub const DISTANT: Self = Self(RRPV_MAX);

    /// Returns the raw counter value in `0..=3`.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Marks the block as about to be reused (hit priority).
    pub const fn set_near_immediate(&mut self) {
        *self = Self::NEAR_IMMEDIATE;
    }

    /// Marks the block as a long re-reference (SRRIP insertion).
    pub const fn set_long(&mut self) {
        *self = Self::LONG;
    }

    /// Marks the block as a distant re-reference.
    pub const fn set_distant(&mut self) {
        *self = Self::DISTANT;
    }

    /// Returns `true` when the block is eligible for eviction.
    pub const fn is_distant(self) -> bool {
        self.0 == RRPV_MAX
    }

    /// Ages the block by one level, saturating at distant.
    pub const fn increment(&mut self) {
        if self.0 < RRPV_MAX {
            self.0 += 1;
        }
    }
}

impl Default for Rrpv {
    /// Freshly allocated blocks start at distant.
    fn default() -> Self {
        Self::DISTANT
    }
}

impl fmt::Display for Rrpv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
