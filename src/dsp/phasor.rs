//! Phase accumulator.

use crate::fixed::U0_32;

/// A phase in `[0, 1)` that wraps around once per cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Phasor {
    phase: U0_32,
}

impl Phasor {
    pub fn with_phase(phase: U0_32) -> Self {
        Phasor { phase }
    }

    pub fn phase(&self) -> U0_32 {
        self.phase
    }

    /// Advance by one sample and return the new phase.
    #[inline]
    pub fn process(&mut self, increment: U0_32) -> U0_32 {
        self.phase = self.phase.wrapping_add(increment);
        self.phase
    }

    /// Advance by `samples` samples at once.
    pub fn advance_by(&mut self, increment: U0_32, samples: usize) {
        let total = increment.repr().wrapping_mul(samples as u32);
        self.phase = self.phase.wrapping_add(U0_32::of_repr(total));
    }
}
