//! Pitch conversion — semitones to frequency ratios and phase increments.
//!
//! Pitches are MIDI-style semitone numbers (69 = A4 = 440 Hz). Ratios come
//! from two 256-entry tables, one for whole semitones and one for 256ths of a
//! semitone, so a conversion costs two lookups and one multiply.

use super::SAMPLE_RATE;
use super::tables::tables;
use crate::fixed::U0_32;

/// Reference tuning: MIDI note 69 plays at this frequency.
pub const A4_FREQUENCY: f32 = 440.0;
pub const A4_MIDI: f32 = 69.0;

/// Lowest and highest semitone offsets the ratio tables cover.
pub const MIN_SEMITONES: f32 = -128.0;
pub const MAX_SEMITONES: f32 = 127.99;

/// Frequency ratio of an interval in semitones, clamped to the table range.
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    let t = tables();
    let pitch = semitones.clamp(MIN_SEMITONES, MAX_SEMITONES) - MIN_SEMITONES;
    let whole = pitch as usize;
    let fine = ((pitch - whole as f32) * 256.0) as usize;
    t.pitch_ratios_high[whole.min(255)] * t.pitch_ratios_low[fine.min(255)]
}

/// Frequency in Hz of a MIDI pitch.
pub fn pitch_to_hz(pitch: f32) -> f32 {
    A4_FREQUENCY * semitones_to_ratio(pitch - A4_MIDI)
}

/// Frequency of a MIDI pitch normalized to the sample rate (cycles per
/// sample, 0.5 is Nyquist).
pub fn pitch_to_normalized(pitch: f32) -> f32 {
    pitch_to_hz(pitch) / SAMPLE_RATE as f32
}

/// Per-sample phase increment for a normalized frequency. Frequencies at or
/// above the sample rate saturate to just under one cycle per sample.
pub fn increment(normalized: f32) -> U0_32 {
    U0_32::from_f32(normalized)
}
