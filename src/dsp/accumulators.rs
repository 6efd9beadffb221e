//! Per-voice frequency and amplitude, generated voice by voice.

use super::pitch::pitch_to_normalized;
use super::quantizer::Grid;

/// Largest detune of voice `i`, in semitones per voice index.
pub const MAX_DETUNE: f32 = 0.25;

/// The two frequencies a voice crossfades between, normalized to the sample
/// rate, and the weight of the second one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrequencyPair {
    pub freq1: f32,
    pub freq2: f32,
    pub crossfade: f32,
}

/// Voice `i` plays `root + i * spread` quantized to the grid, transposed by
/// `pitch` and detuned by `detune * i` with alternating sign.
#[derive(Debug, Clone)]
pub struct FrequencyAccumulator<'a> {
    grid: &'a Grid,
    pitch: f32,
    spread: f32,
    transpose: f32,
    detune: f32,
    index: usize,
}

impl<'a> FrequencyAccumulator<'a> {
    pub fn new(grid: &'a Grid, root: f32, spread: f32, transpose: f32, detune: f32) -> Self {
        FrequencyAccumulator {
            grid,
            pitch: root,
            spread,
            transpose,
            detune: detune * MAX_DETUNE,
            index: 0,
        }
    }
}

impl Iterator for FrequencyAccumulator<'_> {
    type Item = FrequencyPair;

    fn next(&mut self) -> Option<FrequencyPair> {
        let q = self.grid.process(self.pitch);
        let sign = if self.index % 2 == 0 { 1.0 } else { -1.0 };
        let offset = self.transpose + sign * self.detune * self.index as f32;

        self.pitch += self.spread;
        self.index += 1;
        Some(FrequencyPair {
            freq1: pitch_to_normalized(q.p1 + offset),
            freq2: pitch_to_normalized(q.p2 + offset),
            crossfade: q.crossfade,
        })
    }
}

/// Geometric amplitudes: each voice is `tilt` times the previous one. Voices
/// past the active count get 0. The series is seeded so the loudest active
/// voice has amplitude 1.
#[derive(Debug, Clone)]
pub struct AmplitudeAccumulator {
    amplitude: f32,
    tilt: f32,
    active: usize,
    index: usize,
}

impl AmplitudeAccumulator {
    pub fn new(tilt: f32, active: usize) -> Self {
        let seed = if tilt > 1.0 {
            tilt.powi(-(active.saturating_sub(1) as i32))
        } else {
            1.0
        };
        AmplitudeAccumulator {
            amplitude: seed,
            tilt,
            active,
            index: 0,
        }
    }

    /// Sum of the active amplitudes.
    pub fn total(tilt: f32, active: usize) -> f32 {
        Self::new(tilt, active).take(active).sum()
    }
}

impl Iterator for AmplitudeAccumulator {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let amplitude = if self.index < self.active { self.amplitude } else { 0.0 };
        self.amplitude *= self.tilt;
        self.index += 1;
        Some(amplitude)
    }
}
