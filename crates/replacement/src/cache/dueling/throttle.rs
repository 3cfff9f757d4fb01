//! Bimodal insertion throttle.
//!
//! Bimodal insertion places most new blocks at the lowest priority and only one in
//! every `eps_inverse` at the priority a normal access would get. Instead of a random
//! draw the throttle uses a cyclic counter: the call that observes 0 gets high
//! priority, and every call advances the counter whichever branch it takes.

/// Cyclic counter of period `eps_inverse`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BimodalThrottle {
    counter: u32,
    eps_inverse: u32,
}

impl BimodalThrottle {
    /// Creates a throttle with period `eps_inverse`, starting at 0.
    ///
    /// # Panics
    ///
    /// Panics if `eps_inverse` is 0.
    pub const fn new(eps_inverse: u32) -> Self {
        Self::starting_at(eps_inverse, 0)
    }

    /// Creates a throttle whose counter currently reads `position` (mod `eps_inverse`).
    ///
    /// # Panics
    ///
    /// Panics if `eps_inverse` is 0.
    pub const fn starting_at(eps_inverse: u32, position: u32) -> Self {
        assert!(eps_inverse > 0, "bimodal throttle period must be nonzero");
        Self {
            counter: position % eps_inverse,
            eps_inverse,
        }
    }

    /// Current counter value, in `0..eps_inverse`.
    pub const fn position(&self) -> u32 {
        self.counter
    }

    /// Throttle period.
    pub const fn eps_inverse(&self) -> u32 {
        self.eps_inverse
    }

    /// Decides the priority of one bimodal insertion and advances the counter.
    pub const fn should_insert_high_priority(&mut self) -> bool {
        let high = self.counter == 0;
        self.counter = (self.counter + 1) % self.eps_inverse;
        high
    }
}

impl Default for BimodalThrottle {
    fn default() -> Self {
        Self::new(crate::common::constants::BIP_EPS_INVERSE)
    }
}
