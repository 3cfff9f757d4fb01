//! Policy Selector (PSEL).
//!
//! A saturating counter shared by every set of one cache. Misses in plain-policy
//! monitor sets push it up, misses in bimodal-policy monitor sets push it down.
//! Follower sets read its most significant bit: below the midpoint the plain policy
//! is winning, at or above it the bimodal policy is.
//!
//! The counter starts at the midpoint, so a cold cache follows the bimodal policy
//! until the monitors say otherwise.

use tracing::debug;

use super::InsertionMode;

/// Saturating policy selector counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolicySelector {
    value: u32,
    max: u32,
}

impl PolicySelector {
    /// Creates a selector of `bits` width, starting at the midpoint.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is 0 or wider than 31. Configuration validation keeps
    /// widths inside `1..=16`.
    pub fn new(bits: u32) -> Self {
        assert!(
            (1..u32::BITS).contains(&bits),
            "policy selector width {bits} out of range"
        );
        let max = (1 << bits) - 1;
        Self {
            value: (max >> 1) + 1,
            max,
        }
    }

    /// Creates a selector of `bits` width holding `value`, clamped to its range.
    pub fn with_value(bits: u32, value: u32) -> Self {
        let mut selector = Self::new(bits);
        selector.value = value.min(selector.max);
        selector
    }

    /// Current counter value.
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Largest value the counter can hold.
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Threshold at or above which followers use the bimodal policy.
    pub const fn midpoint(&self) -> u32 {
        (self.max >> 1) + 1
    }

    /// Records a miss in a plain-policy monitor set.
    pub fn record_plain_miss(&mut self) {
        if self.value < self.max {
            self.update(self.value + 1);
        }
    }

    /// Records a miss in a bimodal-policy monitor set.
    pub fn record_bimodal_miss(&mut self) {
        if self.value > 0 {
            self.update(self.value - 1);
        }
    }

    /// Policy follower sets should use right now.
    ///
    /// Recomputed from the counter on every call.
    pub const fn follower_mode(&self) -> InsertionMode {
        if self.value < self.midpoint() {
            InsertionMode::Plain
        } else {
            InsertionMode::Bimodal
        }
    }

    fn update(&mut self, value: u32) {
        let before = self.follower_mode();
        self.value = value;
        let after = self.follower_mode();
        if before != after {
            debug!(psel = value, from = ?before, to = ?after, "follower policy switched");
        }
    }
}

impl Default for PolicySelector {
    fn default() -> Self {
        Self::new(crate::common::constants::PSEL_BITS)
    }
}
