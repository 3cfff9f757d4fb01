//! Replacement statistics collection and reporting.
//!
//! This module tracks what the replacement policies did. It provides:
//! 1. **Duel outcome:** Monitor misses charged to each policy and follower insertions.
//! 2. **Insertion mix:** High- versus low-priority placements.
//! 3. **Eviction work:** Victim selections, DRRIP aging passes, and invalidations.
//!
//! Counters are plain `u64` fields so the owning policy can bump them inline.

use serde::Serialize;

use crate::cache::dueling::SetRole;
use crate::common::error::StatsError;

/// Counters maintained by one replacement policy instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PolicyStats {
    /// Hits reported by the controller.
    pub hits: u64,
    /// Insertions (one per miss fill).
    pub insertions: u64,
    /// Insertions into plain-policy monitor sets.
    pub plain_monitor_misses: u64,
    /// Insertions into bimodal-policy monitor sets.
    pub bimodal_monitor_misses: u64,
    /// Insertions into follower sets.
    pub follower_insertions: u64,
    /// Insertions placed at the priority of a normal access.
    pub high_priority_insertions: u64,
    /// Insertions placed at the lowest priority.
    pub low_priority_insertions: u64,
    /// Blocks invalidated by the controller.
    pub invalidations: u64,
    /// Victims selected.
    pub victim_selections: u64,
    /// DRRIP passes that aged every block of a set.
    pub aging_passes: u64,
}

impl PolicyStats {
    /// Counts one insertion into a set with the given dueling role.
    pub const fn record_insertion(&mut self, role: SetRole) {
        self.insertions += 1;
        match role {
            SetRole::PlainMonitor => self.plain_monitor_misses += 1,
            SetRole::BimodalMonitor => self.bimodal_monitor_misses += 1,
            SetRole::Follower => self.follower_insertions += 1,
        }
    }

    /// Serializes the counters as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, StatsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Fraction of monitor misses charged to the plain policy.
    ///
    /// Returns `None` before any monitor set has missed.
    pub fn plain_miss_share(&self) -> Option<f64> {
        let total = self.plain_monitor_misses + self.bimodal_monitor_misses;
        if total == 0 {
            None
        } else {
            Some(self.plain_monitor_misses as f64 / total as f64)
        }
    }
}
