//! Twist (phase-domain) and warp (amplitude-domain) distortions applied while
//! a wavetable is computed.

use super::tables::{self, CHEBY_TABLES, CRUSH_TABLES, tables};
use crate::fixed::{Fixed, S1_15, U0_16, U0_32, U8_24};
use crate::parameters::{TwistMode, WarpMode};

/// Largest PULSAR compression of the phase: the cycle plays in 1/16th of
/// the period at full amount.
const PULSAR_MAX_GAIN: f32 = 16.0;

/// Distort a phase in `[0, 1)`. `amount` is in `[0, 1]`.
pub fn twist(mode: TwistMode, phase: U0_32, amount: f32) -> U0_32 {
    match mode {
        // Feedback is applied at playback time.
        TwistMode::Feedback => phase,
        TwistMode::Pulsar => {
            let gain = U8_24::from_f32(1.0 + amount * (PULSAR_MAX_GAIN - 1.0));
            let compressed: Fixed<u64, 8, 56> = phase.mul(gain);
            compressed.saturate()
        }
        TwistMode::Decimate => {
            let scaled = phase.scale(U0_16::from_f32(amount));
            let mask = U0_32::from_f32(amount * 0.25);
            U0_32::of_repr(phase.repr() ^ scaled.repr() ^ mask.repr())
        }
    }
}

/// Distort a sample. `amount` is in `[0, 1]`.
pub fn warp(mode: WarpMode, sample: S1_15, amount: f32) -> S1_15 {
    let t = tables();
    let amount = amount.clamp(0.0, 1.0);
    let y = match mode {
        WarpMode::Fold => {
            let x = sample.to_f32();
            let gain = tables::fold_gain(amount);
            let folded = tables::interpolate(&t.fold, x.abs() * gain / tables::FOLD_RANGE);
            let peak = tables::interpolate(&t.fold_max, amount);
            let folded = if x < 0.0 { -folded } else { folded };
            folded / peak
        }
        WarpMode::Cheby => {
            let x: U0_16 = sample.to_unsigned_scale();
            crossfade_tables(&t.cheby, amount * (CHEBY_TABLES - 2) as f32, x.to_f32())
        }
        WarpMode::Crush => {
            let x: U0_16 = sample.to_unsigned_scale();
            crossfade_tables(&t.crush, amount * (CRUSH_TABLES - 1) as f32, x.to_f32())
        }
    };
    S1_15::from_f32(y)
}

/// Crossfade between tables `floor(index)` and the next one, each read at
/// `pos` in `[0, 1]`.
fn crossfade_tables<const SIZE: usize>(set: &[[f32; SIZE]], index: f32, pos: f32) -> f32 {
    let last = set.len() - 1;
    let i = (index.max(0.0) as usize).min(last - 1);
    let frac = (index - i as f32).clamp(0.0, 1.0);
    let a = tables::interpolate(&set[i], pos);
    let b = tables::interpolate(&set[i + 1], pos);
    a + (b - a) * frac
}
