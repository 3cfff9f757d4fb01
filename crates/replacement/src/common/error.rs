//! Error definitions.
//!
//! The replacement logic itself has no recoverable failure modes: a bad set index or a
//! block from the wrong set is a controller bug and panics at the call site. The errors
//! here cover the fallible edges of the crate:
//! 1. **Configuration:** Parsing, loading, and validating a [`crate::config::CacheConfig`].
//! 2. **Statistics:** Serializing counters for reporting.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a cache configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for the expected schema.
    #[error("invalid cache configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read cache configuration {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Associativity must be at least one way.
    #[error("cache must have at least one way")]
    ZeroWays,

    /// Line size must be a nonzero power of two.
    #[error("line size {0} is not a nonzero power of two")]
    BadLineSize(usize),

    /// Capacity must hold a whole, nonzero number of sets.
    #[error("cache size {size_bytes} is not a nonzero multiple of line size {line_bytes} x {ways} ways")]
    BadGeometry {
        /// Total capacity in bytes.
        size_bytes: usize,
        /// Line size in bytes.
        line_bytes: usize,
        /// Associativity.
        ways: usize,
    },

    /// The bimodal throttle period must be nonzero.
    #[error("bimodal epsilon inverse must be nonzero")]
    ZeroEpsInverse,

    /// The policy selector width is outside the supported range.
    #[error("policy selector width {0} is outside 1..=16")]
    BadSelectorWidth(u32),
}

/// Errors raised while exporting statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Serialization to JSON failed.
    #[error("failed to serialize statistics: {0}")]
    Json(#[from] serde_json::Error),
}
