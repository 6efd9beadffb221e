//! One-cycle waveform shared by every oscillator.

use super::WAVEFORM_SIZE;
use super::distortion::{twist, warp};
use super::tables::tables;
use crate::fixed::{S1_15, S17_15, U0_16, U0_32, U8_24};
use crate::parameters::{Twist, Warp};

/// Stored points: one cycle plus a guard point equal to the first one.
pub const WAVETABLE_SIZE: usize = WAVEFORM_SIZE + 1;

/// Phase distance between two wavetable points.
const POINT_STEP: u32 = 1 << (32 - WAVEFORM_SIZE.trailing_zeros());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wavetable {
    samples: [S1_15; WAVETABLE_SIZE],
}

impl Default for Wavetable {
    /// An undistorted sine.
    fn default() -> Self {
        Self::compute(Twist::default(), Warp::default())
    }
}

impl Wavetable {
    /// Render one cycle of a sine through the twist and warp stages.
    pub fn compute(twist_params: Twist, warp_params: Warp) -> Self {
        let t = tables();
        let mut samples = [S1_15::ZERO; WAVETABLE_SIZE];
        let mut phase = U0_32::ZERO;
        for sample in samples.iter_mut() {
            let twisted = twist(twist_params.mode, phase, twist_params.value);
            let sine = t.sine(twisted);
            *sample = warp(warp_params.mode, sine, warp_params.value);
            phase = phase.wrapping_add(U0_32::of_repr(POINT_STEP));
        }
        Wavetable { samples }
    }

    pub fn samples(&self) -> &[S1_15; WAVETABLE_SIZE] {
        &self.samples
    }

    /// Linearly interpolated sample at `phase`.
    #[inline]
    pub fn interpolate(&self, phase: U0_32) -> S1_15 {
        let indexed: U8_24 = phase.shift_point();
        let i = indexed.integral() as usize;
        let frac: U0_16 = indexed.frac().wrap();
        let a: S17_15 = self.samples[i].promote();
        let b: S17_15 = self.samples[i + 1].promote();
        (a + (b - a).scale(frac)).saturate()
    }
}
