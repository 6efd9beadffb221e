//! Wavetable oscillator with phase modulation and a feedback path.

use super::filter::OnePoleLp;
use super::phasor::Phasor;
use super::wavetable::Wavetable;
use super::{BLOCK_SIZE, Block};
use crate::fixed::{S1_15, S17_15, U0_16, U0_32};

/// Per-block playback settings shared by both oscillators of a voice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Voicing {
    /// Gain of this voice in the mix.
    pub amplitude: S17_15,
    /// Phase-modulation depth, in cycles per unit of modulator.
    pub modulation: S17_15,
    /// Self-modulation amount, zero unless the twist mode is feedback.
    pub feedback: U0_16,
}

/// Low-passed self-modulation: the last output, filtered, pushes the read
/// phase of the next sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct SineShaper {
    history: S1_15,
    lp: OnePoleLp<2>,
}

impl SineShaper {
    #[inline]
    pub fn offset(&self, feedback: U0_16) -> U0_32 {
        let push: S17_15 = self.history.scale(feedback).promote();
        push.wrap()
    }

    #[inline]
    pub fn update(&mut self, sample: S1_15) {
        self.history = self.lp.process(sample);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Oscillator {
    phasor: Phasor,
    shaper: SineShaper,
    /// Fade and amplitude reached at the end of the previous block.
    fade: S17_15,
    gain: S17_15,
}

impl Oscillator {
    pub fn new(initial_phase: U0_32) -> Self {
        Oscillator {
            phasor: Phasor::with_phase(initial_phase),
            ..Self::default()
        }
    }

    #[cfg(test)]
    fn phase(&self) -> U0_32 {
        self.phasor.phase()
    }

    #[cfg(test)]
    fn fade(&self) -> f32 {
        self.fade.to_f32()
    }

    /// Render one block.
    ///
    /// The read phase of each sample is the running phase plus `mod_in`
    /// scaled by the modulation depth, plus the feedback push. The looked-up
    /// sample is faded by a level ramped linearly from the previous block's
    /// `fade` to this one and added to `mod_out`. Scaled by the voice
    /// amplitude, ramped the same way, it is added to `out`. A silent
    /// oscillator only advances its phase.
    #[allow(clippy::too_many_arguments)]
    pub fn process(
        &mut self,
        wavetable: &Wavetable,
        freq: U0_32,
        fade: f32,
        voicing: &Voicing,
        mod_in: &Block<S1_15>,
        mod_out: &mut Block<S1_15>,
        out: &mut Block<S17_15>,
    ) {
        let target = S17_15::from_f32(fade);
        if target == S17_15::ZERO && self.fade == S17_15::ZERO {
            self.phasor.advance_by(freq, BLOCK_SIZE);
            self.gain = voicing.amplitude;
            return;
        }

        let step = (target - self.fade).div_int(BLOCK_SIZE as i32);
        let gain_step = (voicing.amplitude - self.gain).div_int(BLOCK_SIZE as i32);
        let mut level = self.fade;
        let mut gain = self.gain;
        let samples = mod_in.iter().zip(mod_out.iter_mut()).zip(out.iter_mut());
        for ((input, modulated), output) in samples {
            let phase = self.phasor.process(freq);
            let input: S17_15 = input.promote();
            let modulation: U0_32 = input.scale(voicing.modulation).wrap();
            let read = phase
                .wrapping_add(modulation)
                .wrapping_add(self.shaper.offset(voicing.feedback));

            let sample = wavetable.interpolate(read);
            self.shaper.update(sample);

            level += step;
            gain += gain_step;
            let faded = sample.scale(level);
            *modulated += faded;
            let faded: S17_15 = faded.promote();
            *output += faded.scale(gain);
        }
        self.fade = target;
        self.gain = voicing.amplitude;
    }
}
