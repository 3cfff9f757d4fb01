//! Engine-wide constants.
//!
//! Values that parameterize set dueling and re-reference prediction. Tunables that a
//! cache model may want to override (selector width, bimodal epsilon) also appear in
//! [`crate::config::DuelingConfig`]; the constants here are their defaults.

/// Sets whose index is 0 or a multiple of this value monitor the plain policy.
pub const PLAIN_MONITOR_STRIDE: usize = 33;

/// Sets whose index is a nonzero multiple of this value monitor the bimodal policy.
pub const BIMODAL_MONITOR_STRIDE: usize = 31;

/// Default policy selector width in bits (range `[0, 1023]`).
pub const PSEL_BITS: u32 = 10;

/// Widest policy selector the engine accepts.
pub const PSEL_MAX_BITS: u32 = 16;

/// Default inverse of the bimodal insertion probability (1 in 32).
pub const BIP_EPS_INVERSE: u32 = 32;

/// Largest re-reference prediction value of the 2-bit counter.
pub const RRPV_MAX: u8 = 3;
