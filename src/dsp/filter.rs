//! Fixed-point one-pole lowpass.

use crate::fixed::{S1_15, S17_15};

/// `y += (x - y) / 2^SHIFT`. Larger shifts filter harder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnePoleLp<const SHIFT: u32> {
    state: S17_15,
}

impl<const SHIFT: u32> OnePoleLp<SHIFT> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn process(&mut self, input: S1_15) -> S1_15 {
        let x: S17_15 = input.promote();
        let delta = x - self.state;
        self.state += delta.div_int(1 << SHIFT);
        self.state.saturate()
    }
}
