//! Configuration for the replacement engine.
//!
//! This module defines the structures used to parameterize a cache instance. It provides:
//! 1. **Defaults:** Baseline geometry and set-dueling constants.
//! 2. **Structures:** Cache geometry plus the dueling parameters shared by both policies.
//! 3. **Enums:** The replacement policy family (DIP or DRRIP).
//!
//! Configuration is supplied as JSON (inline or from a file), or use `CacheConfig::default()`.
//! Every entry point that builds a cache validates the configuration first.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::constants::{BIP_EPS_INVERSE, PSEL_BITS, PSEL_MAX_BITS};
use crate::common::error::ConfigError;

/// Default configuration constants.
///
/// These values define the baseline cache when not explicitly overridden.
mod defaults {
    /// Default cache size in bytes (256 KiB).
    ///
    /// With 64-byte lines and 16 ways this yields 256 sets, enough for
    /// several monitor sets of each policy.
    pub const CACHE_SIZE: usize = 256 * 1024;

    /// Default cache line size in bytes (64 bytes).
    pub const CACHE_LINE: usize = 64;

    /// Default cache associativity (16 ways).
    pub const CACHE_WAYS: usize = 16;
}

/// Replacement policy families.
///
/// Both families duel a "plain" insertion policy against its bimodal counterpart;
/// they differ in what insertion and eviction mean for a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Dynamic Insertion Policy.
    ///
    /// Keeps a strict recency order per set and duels LRU insertion against
    /// bimodal insertion (BIP).
    #[serde(alias = "Dip", alias = "dip")]
    Dip,
    /// Dynamic Re-Reference Interval Prediction.
    ///
    /// Keeps a 2-bit re-reference prediction value per block and duels static
    /// insertion (SRRIP) against bimodal insertion (BRRIP).
    #[default]
    #[serde(alias = "Drrip", alias = "drrip")]
    Drrip,
}

/// Set-dueling parameters shared by both policy families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DuelingConfig {
    /// Inverse of the probability that a bimodal insertion gets high priority.
    #[serde(default = "DuelingConfig::default_eps_inverse")]
    pub eps_inverse: u32,

    /// Width of the saturating policy selector in bits.
    #[serde(default = "DuelingConfig::default_psel_bits")]
    pub psel_bits: u32,
}

impl DuelingConfig {
    /// Returns the default bimodal epsilon inverse.
    fn default_eps_inverse() -> u32 {
        BIP_EPS_INVERSE
    }

    /// Returns the default policy selector width.
    fn default_psel_bits() -> u32 {
        PSEL_BITS
    }

    /// Checks that the throttle period and selector width are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroEpsInverse`] or [`ConfigError::BadSelectorWidth`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.eps_inverse == 0 {
            return Err(ConfigError::ZeroEpsInverse);
        }
        if self.psel_bits == 0 || self.psel_bits > PSEL_MAX_BITS {
            return Err(ConfigError::BadSelectorWidth(self.psel_bits));
        }
        Ok(())
    }
}

impl Default for DuelingConfig {
    fn default() -> Self {
        Self {
            eps_inverse: BIP_EPS_INVERSE,
            psel_bits: PSEL_BITS,
        }
    }
}

/// Cache geometry and replacement configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Cache line size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Replacement policy family
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Set-dueling parameters
    #[serde(default)]
    pub dueling: DuelingConfig,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default cache line size in bytes.
    fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    /// Returns the default cache associativity (number of ways).
    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Parses and validates a configuration from JSON text.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input, or a validation error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`CacheConfig::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Number of sets implied by the geometry.
    ///
    /// Only meaningful for a configuration that passed [`CacheConfig::validate`].
    pub const fn num_sets(&self) -> usize {
        self.size_bytes / (self.line_bytes * self.ways)
    }

    /// Checks geometry and dueling parameters.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] validation failure found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::BadLineSize(self.line_bytes));
        }
        let whole_sets = self
            .line_bytes
            .checked_mul(self.ways)
            .is_some_and(|set_bytes| self.size_bytes != 0 && self.size_bytes % set_bytes == 0);
        if !whole_sets {
            return Err(ConfigError::BadGeometry {
                size_bytes: self.size_bytes,
                line_bytes: self.line_bytes,
                ways: self.ways,
            });
        }
        self.dueling.validate()
    }
}

impl Default for CacheConfig {
    /// Creates a default cache configuration.
    ///
    /// 256 KiB, 64-byte lines, 16-way set-associative, DRRIP replacement,
    /// 1-in-32 bimodal insertion and a 10-bit policy selector.
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::default(),
            dueling: DuelingConfig::default(),
        }
    }
}
