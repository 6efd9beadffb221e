//! Mixer — Sums voice outputs into a stereo block and saturates it to 16 bits.

use super::{BLOCK_SIZE, Block, Frame};
use crate::fixed::{S1_15, S17_15};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Left,
    Right,
}

/// Wide stereo accumulators for one block.
#[derive(Debug, Clone)]
pub struct Mixer {
    left: Block<S17_15>,
    right: Block<S17_15>,
}

impl Default for Mixer {
    fn default() -> Self {
        Mixer {
            left: [S17_15::ZERO; BLOCK_SIZE],
            right: [S17_15::ZERO; BLOCK_SIZE],
        }
    }
}

impl Mixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero both channels.
    pub fn clear(&mut self) {
        self.left.fill(S17_15::ZERO);
        self.right.fill(S17_15::ZERO);
    }

    #[cfg(test)]
    pub fn channel(&self, channel: Channel) -> &Block<S17_15> {
        match channel {
            Channel::Left => &self.left,
            Channel::Right => &self.right,
        }
    }

    pub fn channel_mut(&mut self, channel: Channel) -> &mut Block<S17_15> {
        match channel {
            Channel::Left => &mut self.left,
            Channel::Right => &mut self.right,
        }
    }

    /// Write the mix to `out`, saturating to 16 bits, and return how many
    /// samples had to be clipped. In mono the left channel is copied to both
    /// sides.
    pub fn output(&self, mono: bool, out: &mut [Frame; BLOCK_SIZE]) -> usize {
        let right = if mono { &self.left } else { &self.right };
        let mut clipped = 0;
        for ((frame, l), r) in out.iter_mut().zip(self.left.iter()).zip(right.iter()) {
            let (l, l_clipped) = to_sample(*l);
            let (r, r_clipped) = to_sample(*r);
            clipped += usize::from(l_clipped) + usize::from(r_clipped);
            *frame = Frame { l, r };
        }
        clipped
    }
}

fn to_sample(x: S17_15) -> (i16, bool) {
    let sample: S1_15 = x.saturate();
    let back: S17_15 = sample.promote();
    (sample.repr(), back != x)
}
