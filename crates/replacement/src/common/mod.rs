//! Common utilities and types used throughout the replacement engine.
//!
//! This module provides the building blocks shared by the policies, the tag store, and
//! the configuration layer. It includes:
//! 1. **Constants:** Set-dueling moduli, selector and throttle defaults, RRPV levels.
//! 2. **Error Handling:** Configuration and statistics error types.

/// Common constants used throughout the engine.
pub mod constants;

/// Error types for configuration and statistics export.
pub mod error;

pub use error::{ConfigError, StatsError};
