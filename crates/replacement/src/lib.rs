//! Set-dueling cache replacement engine.
//!
//! This crate decides which block a set-associative cache evicts on a miss and where a
//! newly inserted or freshly hit block lands in its set's priority ordering. It provides:
//! 1. **Policies:** DIP (LRU vs. bimodal insertion) and DRRIP (SRRIP vs. bimodal RRIP).
//! 2. **Set dueling:** Fixed monitor sets, a saturating policy selector, and the bimodal throttle.
//! 3. **Tag store:** The adapter a cache controller drives through hit, insert, victim and invalidate.
//! 4. **Reference controller:** A minimal address-driven cache for running traces end to end.
//! 5. **Configuration and statistics:** serde-backed config and per-policy counters.

/// Common constants and error types.
pub mod common;
/// Cache configuration (defaults, policy selection, dueling parameters).
pub mod config;
/// Tag store, set storage, replacement policies, and the reference controller.
pub mod cache;
/// Replacement policy statistics.
pub mod stats;

/// Root configuration type; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::CacheConfig;
/// Address-driven reference controller built on the tag store.
pub use crate::cache::CacheSim;
/// Adapter exposing the four replacement entry points to a cache controller.
pub use crate::cache::TagStore;
