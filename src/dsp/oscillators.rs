//! Voice bank — fans one control snapshot out to `N` voices, routes
//! modulation between them and mixes them to stereo.

use std::array;

use super::accumulators::{AmplitudeAccumulator, FrequencyAccumulator};
use super::mixer::{Channel, Mixer};
use super::oscillator::Voicing;
use super::oscillator_pair::OscillatorPair;
use super::quantizer::Grid;
use super::wavetable::Wavetable;
use super::{BLOCK_SIZE, Block, Frame};
use crate::fixed::{S1_15, S17_15, U0_16, U0_32};
use crate::parameters::{ModulationMode, Parameters, SplitMode, TwistMode};

static SILENCE: Block<S1_15> = [S1_15::ZERO; BLOCK_SIZE];

/// Which modulation buffers a voice reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Unmodulated, writes buffer A.
    Source,
    AToB,
    BToA,
}

/// Modulation topology: ONE chains each voice into the next, TWO makes
/// voice 0 modulate all others, THREE pairs voices (0 into 1, 2 into 3...).
pub fn route(mode: ModulationMode, voice: usize) -> Route {
    match mode {
        ModulationMode::One if voice == 0 => Route::Source,
        ModulationMode::One if voice % 2 == 1 => Route::AToB,
        ModulationMode::One => Route::BToA,
        ModulationMode::Two if voice == 0 => Route::Source,
        ModulationMode::Two => Route::AToB,
        ModulationMode::Three if voice % 2 == 0 => Route::Source,
        ModulationMode::Three => Route::AToB,
    }
}

/// Whether `voice` belongs to the first group of a split: the left channel
/// for stereo, the frozen voices for freeze. `active` is the number of
/// sounding voices.
pub fn in_first_group(mode: SplitMode, voice: usize, active: usize) -> bool {
    match mode {
        SplitMode::Alternate => voice % 2 == 0,
        SplitMode::Split => 2 * voice < active,
        SplitMode::Mono => true,
    }
}

/// Deterministic, decorrelated start phase for oscillator `index`.
fn initial_phase(index: usize) -> U0_32 {
    let seed = (index as u64 + 1)
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    U0_32::of_repr((seed >> 32) as u32)
}

/// Portion of the distance to its new level a voice covers per block.
const LEVEL_SMOOTHING: f32 = 0.125;

pub struct Oscillators<const N: usize> {
    pairs: [OscillatorPair; N],
    /// Per-voice gain in the mix, smoothed toward `amplitude / total`.
    levels: [f32; N],
    mod_a: Block<S1_15>,
    mod_b: Block<S1_15>,
    mixer: Mixer,
    clipped: u64,
}

impl<const N: usize> Default for Oscillators<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Oscillators<N> {
    pub fn new() -> Self {
        const { assert!(N >= 1, "a voice bank needs at least one voice") };
        Oscillators {
            pairs: array::from_fn(|i| {
                OscillatorPair::new(initial_phase(2 * i), initial_phase(2 * i + 1))
            }),
            levels: [0.0; N],
            mod_a: [S1_15::ZERO; BLOCK_SIZE],
            mod_b: [S1_15::ZERO; BLOCK_SIZE],
            mixer: Mixer::new(),
            clipped: 0,
        }
    }

    pub fn pair(&self, voice: usize) -> Option<&OscillatorPair> {
        self.pairs.get(voice)
    }

    /// Hold voice `voice` at its current frequencies.
    pub fn set_freeze(&mut self, voice: usize) {
        if let Some(pair) = self.pairs.get_mut(voice) {
            pair.set_frozen(true);
        }
    }

    pub fn unfreeze_all(&mut self) {
        for pair in self.pairs.iter_mut() {
            pair.set_frozen(false);
        }
    }

    pub fn is_frozen(&self, voice: usize) -> bool {
        self.pairs.get(voice).is_some_and(OscillatorPair::is_frozen)
    }

    /// Output samples that exceeded 16 bits and were saturated.
    pub fn clipped_samples(&self) -> u64 {
        self.clipped
    }

    /// Render one block of all voices into `out`.
    ///
    /// Each voice plays at its amplitude divided by the sum of the active
    /// amplitudes. A change of that level is spread over several blocks;
    /// since every voice moves the same fraction of the way, the levels keep
    /// summing to one while they move.
    pub fn process(
        &mut self,
        params: &Parameters,
        grid: &Grid,
        wavetable: &Wavetable,
        out: &mut [Frame; BLOCK_SIZE],
    ) {
        let active = params.num_osc.clamp(1, N);
        let frequencies = FrequencyAccumulator::new(
            grid,
            params.root,
            params.spread,
            params.pitch,
            params.detune,
        );
        let amplitudes = AmplitudeAccumulator::new(params.tilt, active);
        let total = AmplitudeAccumulator::total(params.tilt, active);

        let modulation = S17_15::from_f32(params.modulation.mode.depth(params.modulation.value));
        let feedback = match params.twist.mode {
            TwistMode::Feedback => U0_16::from_f32(params.twist.value),
            _ => U0_16::ZERO,
        };
        let edge = params.grid.mode.crop();

        self.mixer.clear();
        let voices = self
            .pairs
            .iter_mut()
            .zip(self.levels.iter_mut())
            .zip(frequencies)
            .zip(amplitudes);
        for (i, (((pair, level), frequency), amplitude)) in voices.enumerate() {
            let target = if total > 0.0 { amplitude / total } else { 0.0 };
            *level += (target - *level) * LEVEL_SMOOTHING;
            let voicing = Voicing {
                amplitude: S17_15::from_f32(*level),
                modulation,
                feedback,
            };
            let channel = if in_first_group(params.stereo_mode, i, active) {
                Channel::Left
            } else {
                Channel::Right
            };
            let mix = self.mixer.channel_mut(channel);
            let (mod_in, mod_out) = match route(params.modulation.mode, i) {
                Route::Source => (&SILENCE, &mut self.mod_a),
                Route::AToB => (&self.mod_a, &mut self.mod_b),
                Route::BToA => (&self.mod_b, &mut self.mod_a),
            };
            pair.process(wavetable, frequency, edge, &voicing, mod_in, mod_out, mix);
        }

        let mono = params.stereo_mode == SplitMode::Mono;
        let clipped = self.mixer.output(mono, out);
        self.clipped += clipped as u64;
    }
}
