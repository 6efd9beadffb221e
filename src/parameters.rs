//! Control snapshot — every value the engine reads in one control tick.
//!
//! A [`Parameters`] value is plain data: the control side builds it, the
//! engine keeps a private copy per block. It loads from and saves to JSON;
//! missing fields take their defaults and loaded values are clamped to their
//! ranges.

use serde::{Deserialize, Serialize};

use crate::dsp::NUM_OSC;
use crate::error::ConfigError;

/// Number of scale slots selectable with `grid.value`.
pub const GRID_SLOTS: usize = 10;

/// Pitches (root and transposition) are clamped to `±MAX_PITCH` semitones.
pub const MAX_PITCH: f32 = 150.0;

/// Largest `spread` between neighbouring voices, in semitones.
pub const SPREAD_RANGE: f32 = 12.0;

/// `tilt` range: a voice is at most 16 times louder or quieter than the
/// previous one.
pub const MIN_TILT: f32 = 1.0 / 16.0;
pub const MAX_TILT: f32 = 16.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModulationMode {
    /// Each voice modulates the next one.
    #[default]
    One,
    /// Voice 0 modulates every other voice.
    Two,
    /// Voices modulate in adjacent pairs.
    Three,
}

impl ModulationMode {
    /// Phase-modulation depth, in cycles per unit of modulator, for a knob
    /// value in `[0, 1]`.
    pub fn depth(self, value: f32) -> f32 {
        let range = match self {
            ModulationMode::One => 0.9,
            ModulationMode::Two => 6.0,
            ModulationMode::Three => 4.0,
        };
        value * range
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    /// Pitches glide continuously between scale steps.
    #[default]
    Smooth,
    Soft,
    /// Pitches snap to scale steps with a short crossfade.
    Stepped,
}

impl GridMode {
    /// Portion cropped from each end of the oscillator crossfade, in
    /// `[0, 0.5)`.
    pub fn crop(self) -> f32 {
        match self {
            GridMode::Smooth => 0.0,
            GridMode::Soft => 0.25,
            GridMode::Stepped => 0.45,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TwistMode {
    #[default]
    Feedback,
    Pulsar,
    Decimate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarpMode {
    #[default]
    Fold,
    Cheby,
    Crush,
}

/// How voices are divided, for stereo output and for freezing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Even and odd voices.
    #[default]
    Alternate,
    /// Lower and upper half of the voices.
    Split,
    /// All voices together.
    Mono,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modulation {
    pub mode: ModulationMode,
    pub value: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSelection {
    pub mode: GridMode,
    /// Scale slot, `0..GRID_SLOTS`.
    pub value: usize,
}

/// Phase-domain distortion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Twist {
    pub mode: TwistMode,
    pub value: f32,
}

/// Amplitude-domain distortion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Warp {
    pub mode: WarpMode,
    pub value: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Parameters {
    /// Active voices, `1..=NUM_OSC`.
    pub num_osc: usize,
    /// Amplitude ratio between neighbouring voices.
    pub tilt: f32,
    /// Pitch of the first voice before quantization (MIDI semitones).
    pub root: f32,
    /// Transposition added after quantization (semitones).
    pub pitch: f32,
    /// Pitch distance between neighbouring voices before quantization.
    pub spread: f32,
    /// Amount of per-voice detuning after quantization, `[0, 1]`.
    pub detune: f32,
    pub modulation: Modulation,
    pub grid: GridSelection,
    pub twist: Twist,
    pub warp: Warp,
    pub stereo_mode: SplitMode,
    pub freeze_mode: SplitMode,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            num_osc: 1,
            tilt: 1.0,
            root: 60.0,
            pitch: 0.0,
            spread: 0.0,
            detune: 0.0,
            modulation: Modulation::default(),
            grid: GridSelection::default(),
            twist: Twist::default(),
            warp: Warp::default(),
            stereo_mode: SplitMode::default(),
            freeze_mode: SplitMode::default(),
        }
    }
}

impl Parameters {
    /// Parse and validate a JSON parameter set.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: Parameters = serde_json::from_str(json)?;
        params.validate()
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject non-finite values and clamp everything else to its range.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let fields = [
            ("tilt", self.tilt),
            ("root", self.root),
            ("pitch", self.pitch),
            ("spread", self.spread),
            ("detune", self.detune),
            ("modulation.value", self.modulation.value),
            ("twist.value", self.twist.value),
            ("warp.value", self.warp.value),
        ];
        if let Some(&(field, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::OutOfRange { field, value });
        }
        Ok(self.clamped())
    }

    /// Every value forced into its range. Non-finite values fall back to
    /// their defaults, so the result is always safe to render.
    pub fn clamped(self) -> Self {
        let d = Parameters::default();
        let finite = |x: f32, default: f32| if x.is_finite() { x } else { default };
        Parameters {
            num_osc: self.num_osc.clamp(1, NUM_OSC),
            tilt: finite(self.tilt, d.tilt).clamp(MIN_TILT, MAX_TILT),
            root: finite(self.root, d.root).clamp(-MAX_PITCH, MAX_PITCH),
            pitch: finite(self.pitch, d.pitch).clamp(-MAX_PITCH, MAX_PITCH),
            spread: finite(self.spread, d.spread).clamp(0.0, SPREAD_RANGE),
            detune: finite(self.detune, d.detune).clamp(0.0, 1.0),
            modulation: Modulation {
                mode: self.modulation.mode,
                value: finite(self.modulation.value, 0.0).clamp(0.0, 1.0),
            },
            grid: GridSelection {
                mode: self.grid.mode,
                value: self.grid.value.min(GRID_SLOTS - 1),
            },
            twist: Twist {
                mode: self.twist.mode,
                value: finite(self.twist.value, 0.0).clamp(0.0, 1.0),
            },
            warp: Warp {
                mode: self.warp.mode,
                value: finite(self.warp.value, 0.0).clamp(0.0, 1.0),
            },
            stereo_mode: self.stereo_mode,
            freeze_mode: self.freeze_mode,
        }
    }
}
