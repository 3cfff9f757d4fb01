//! Monitor set classification.
//!
//! Set dueling dedicates a small, fixed sample of sets to each competing policy.
//! Membership is a pure function of the set index and never changes while the
//! cache exists. Roughly 1 in 32 sets lands on each side.

use crate::common::constants::{BIMODAL_MONITOR_STRIDE, PLAIN_MONITOR_STRIDE};

/// Role a set plays in the duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetRole {
    /// Always uses the plain policy (LRU or SRRIP); its misses count against it.
    PlainMonitor,
    /// Always uses the bimodal policy (BIP or BRRIP); its misses count against it.
    BimodalMonitor,
    /// Adopts whichever policy the selector currently favours.
    Follower,
}

/// Classifies a set by index.
///
/// Index 0 and multiples of 33 are checked first, then nonzero multiples of 31.
/// No index below 1023 satisfies both rules; if one ever does, the plain rule wins.
pub const fn classify(set_index: usize) -> SetRole {
    if set_index % PLAIN_MONITOR_STRIDE == 0 {
        SetRole::PlainMonitor
    } else if set_index % BIMODAL_MONITOR_STRIDE == 0 {
        SetRole::BimodalMonitor
    } else {
        SetRole::Follower
    }
}
