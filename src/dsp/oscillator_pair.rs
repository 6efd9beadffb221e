//! One voice: two oscillators crossfaded for antialiasing.
//!
//! The quantizer hands each voice two neighbouring scale pitches and a
//! crossfade between them. Each oscillator is additionally faded out by
//! [`antialias`] as its own frequency approaches Nyquist, so a rising pitch
//! disappears before it can alias while its partner takes over.

use std::f32::consts::PI;

use super::Block;
use super::accumulators::FrequencyPair;
use super::oscillator::{Oscillator, Voicing};
use super::pitch::increment;
use super::wavetable::Wavetable;
use crate::fixed::{S1_15, S17_15, U0_32};

/// Gain for an oscillator at normalized frequency `freq`: 1 up to a quarter
/// of the sample rate, 0 from half of it, linear in between.
pub fn antialias(freq: f32) -> f32 {
    if freq <= 0.25 {
        1.0
    } else if freq >= 0.5 {
        0.0
    } else {
        2.0 - 4.0 * freq
    }
}

/// Linear ramp from 0 at `edge` to 1 at `1 - edge`, clamped.
fn crop(edge: f32, x: f32) -> f32 {
    if edge >= 0.5 {
        return if x < 0.5 { 0.0 } else { 1.0 };
    }
    ((x - edge) / (1.0 - 2.0 * edge)).clamp(0.0, 1.0)
}

fn raised_cosine(x: f32) -> f32 {
    0.5 - 0.5 * (PI * x).cos()
}

/// Weight of the second oscillator for a quantizer crossfade.
pub fn crossfade_curve(crossfade: f32, edge: f32) -> f32 {
    raised_cosine(crop(edge, crossfade))
}

#[derive(Debug, Clone, Copy)]
pub struct OscillatorPair {
    osc1: Oscillator,
    osc2: Oscillator,
    frozen: bool,
    frequencies: FrequencyPair,
}

impl OscillatorPair {
    pub fn new(phase1: U0_32, phase2: U0_32) -> Self {
        OscillatorPair {
            osc1: Oscillator::new(phase1),
            osc2: Oscillator::new(phase2),
            frozen: false,
            frequencies: FrequencyPair::default(),
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// A frozen pair keeps playing the frequencies it had when frozen.
    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub fn frequencies(&self) -> FrequencyPair {
        self.frequencies
    }

    /// Render one block. `mod_out` is overwritten with this voice's signal;
    /// `out` accumulates it scaled by the voice amplitude.
    #[allow(clippy::too_many_arguments)]
    pub fn process(
        &mut self,
        wavetable: &Wavetable,
        frequencies: FrequencyPair,
        crossfade_edge: f32,
        voicing: &Voicing,
        mod_in: &Block<S1_15>,
        mod_out: &mut Block<S1_15>,
        out: &mut Block<S17_15>,
    ) {
        if !self.frozen {
            self.frequencies = frequencies;
        }
        let FrequencyPair { freq1, freq2, crossfade } = self.frequencies;

        let c = crossfade_curve(crossfade, crossfade_edge);
        let fade1 = (1.0 - c) * antialias(freq1);
        let fade2 = c * antialias(freq2);

        mod_out.fill(S1_15::ZERO);
        let inc1 = increment(freq1);
        let inc2 = increment(freq2);
        self.osc1.process(wavetable, inc1, fade1, voicing, mod_in, mod_out, out);
        self.osc2.process(wavetable, inc2, fade2, voicing, mod_in, mod_out, out);
    }
}
