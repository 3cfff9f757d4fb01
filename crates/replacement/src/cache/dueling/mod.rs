//! Set Dueling.
//!
//! Both replacement families run the same duel: a plain insertion policy against its
//! bimodal counterpart. This module holds the machinery they share.
//!
//! # Components
//!
//! - `classifier`: Fixed mapping of set index to monitor or follower role.
//! - `psel`: Saturating policy selector updated by monitor misses.
//! - `throttle`: Cyclic counter deciding the rare high-priority bimodal insertion.
//!
//! [`SetDueling`] performs the per-insertion step: classify the set, charge a
//! monitor miss to the selector, and report which insertion mode to apply.

/// Monitor and follower set classification.
pub mod classifier;

/// Policy selector counter.
pub mod psel;

/// Bimodal insertion throttle.
pub mod throttle;

pub use classifier::{SetRole, classify};
pub use psel::PolicySelector;
pub use throttle::BimodalThrottle;

use crate::config::DuelingConfig;

/// Which of the two competing insertion policies to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InsertionMode {
    /// LRU insertion (DIP) or static RRIP insertion (DRRIP).
    Plain,
    /// Bimodal insertion (BIP or BRRIP).
    Bimodal,
}

/// Dueling state owned by one cache instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetDueling {
    selector: PolicySelector,
}

impl SetDueling {
    /// Creates dueling state from configuration.
    pub fn new(config: &DuelingConfig) -> Self {
        Self::with_selector(PolicySelector::new(config.psel_bits))
    }

    /// Creates dueling state around an existing selector.
    pub const fn with_selector(selector: PolicySelector) -> Self {
        Self { selector }
    }

    /// The policy selector.
    pub const fn selector(&self) -> &PolicySelector {
        &self.selector
    }

    /// Handles the dueling side of an insertion into `set_index`.
    ///
    /// Monitor sets charge the miss to their own policy and always use it. Follower
    /// sets leave the selector untouched and use the current winner.
    pub fn select_insertion(&mut self, set_index: usize) -> (SetRole, InsertionMode) {
        let role = classify(set_index);
        let mode = match role {
            SetRole::PlainMonitor => {
                self.selector.record_plain_miss();
                InsertionMode::Plain
            }
            SetRole::BimodalMonitor => {
                self.selector.record_bimodal_miss();
                InsertionMode::Bimodal
            }
            SetRole::Follower => self.selector.follower_mode(),
        };
        (role, mode)
    }
}

impl Default for SetDueling {
    fn default() -> Self {
        Self::new(&DuelingConfig::default())
    }
}
