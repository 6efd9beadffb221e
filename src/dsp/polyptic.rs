//! Polyptic Oscillator — the engine façade.
//!
//! Owns the voice bank, the scale slots and the wavetable, and renders one
//! block of stereo frames per call from a private copy of the control
//! [`Parameters`]. Learn mode records notes into a [`PreGrid`] and commits
//! them into the currently selected scale slot.

use log::debug;

use super::oscillators::{Oscillators, in_first_group};
use super::quantizer::{Grid, PreGrid};
use super::tables::tables;
use super::wavetable::Wavetable;
use super::{BLOCK_SIZE, Frame, NUM_OSC};
use crate::error::LearnError;
use crate::parameters::{GRID_SLOTS, Parameters, SplitMode, Twist, Warp};

pub struct PolypticOscillator<const N: usize = NUM_OSC> {
    oscillators: Oscillators<N>,
    grids: [Grid; GRID_SLOTS],
    pre_grid: PreGrid,
    learning: bool,
    params: Parameters,
    wavetable: Wavetable,
    distortion: (Twist, Warp),
}

impl<const N: usize> Default for PolypticOscillator<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PolypticOscillator<N> {
    pub fn new() -> Self {
        // Build the shared tables now rather than inside the first block.
        tables();
        let params = Parameters::default();
        PolypticOscillator {
            oscillators: Oscillators::new(),
            grids: Grid::presets(),
            pre_grid: PreGrid::new(),
            learning: false,
            params,
            wavetable: Wavetable::compute(params.twist, params.warp),
            distortion: (params.twist, params.warp),
        }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn wavetable(&self) -> &Wavetable {
        &self.wavetable
    }

    /// The scale currently selected by `grid.value`.
    pub fn grid(&self) -> &Grid {
        &self.grids[self.slot()]
    }

    pub fn grids(&self) -> &[Grid; GRID_SLOTS] {
        &self.grids
    }

    fn slot(&self) -> usize {
        self.params.grid.value.min(GRID_SLOTS - 1)
    }

    /// Take a new control snapshot, rebuilding the wavetable here if a
    /// distortion setting changed. Control-thread use only.
    pub fn set_parameters(&mut self, params: Parameters) {
        let params = params.clamped();
        let distortion = (params.twist, params.warp);
        if distortion != self.distortion {
            debug!(
                "Rebuilding wavetable: twist {:?} {:.3}, warp {:?} {:.3}",
                params.twist.mode, params.twist.value, params.warp.mode, params.warp.value
            );
            self.wavetable = Wavetable::compute(params.twist, params.warp);
            self.distortion = distortion;
        }
        if params.grid.value != self.params.grid.value {
            debug!("Selected scale slot {}", params.grid.value);
        }
        self.params = params;
    }

    /// Take a snapshot whose wavetable was already computed elsewhere.
    /// Does not allocate, log or compute tables, so it may run between
    /// blocks on the audio thread.
    pub fn install(&mut self, params: Parameters, wavetable: Option<Wavetable>) {
        let params = params.clamped();
        if let Some(wavetable) = wavetable {
            self.wavetable = wavetable;
            self.distortion = (params.twist, params.warp);
        }
        self.params = params;
    }

    /// Render one block.
    pub fn process(&mut self, out: &mut [Frame; BLOCK_SIZE]) {
        let grid = &self.grids[self.params.grid.value.min(GRID_SLOTS - 1)];
        self.oscillators.process(&self.params, grid, &self.wavetable, out);
    }

    /// Output samples saturated to 16 bits since the engine was created.
    pub fn clipped_samples(&self) -> u64 {
        self.oscillators.clipped_samples()
    }

    pub fn is_learning(&self) -> bool {
        self.learning
    }

    /// Start recording a scale. Notes from an earlier session are dropped.
    pub fn enable_learn(&mut self) {
        self.pre_grid.clear();
        self.learning = true;
    }

    pub fn new_note(&mut self, pitch: f32) -> Result<(), LearnError> {
        if !self.learning {
            return Err(LearnError::NotLearning);
        }
        self.pre_grid.add(pitch)
    }

    /// Stop recording and replace the selected scale with the learned one.
    /// On error the selected scale is left as it was. Returns the slot and
    /// size of the new scale.
    pub fn disable_learn(&mut self) -> Result<(usize, usize), LearnError> {
        if !self.learning {
            return Err(LearnError::NotLearning);
        }
        self.learning = false;
        let grid = self.pre_grid.commit()?;
        let slot = self.slot();
        self.grids[slot] = grid;
        Ok((slot, grid.len()))
    }

    /// Hold the voices picked by `freeze_mode` at their current pitch:
    /// odd voices for alternate, the lower half for split, all for mono.
    /// Releasing unfreezes every voice.
    pub fn freeze(&mut self, on: bool) {
        self.oscillators.unfreeze_all();
        if !on {
            return;
        }
        let active = self.params.num_osc.clamp(1, N);
        for voice in 0..N {
            let frozen = match self.params.freeze_mode {
                SplitMode::Alternate => !in_first_group(SplitMode::Alternate, voice, active),
                mode => in_first_group(mode, voice, active),
            };
            if frozen {
                self.oscillators.set_freeze(voice);
            }
        }
    }

    pub fn is_frozen(&self, voice: usize) -> bool {
        self.oscillators.is_frozen(voice)
    }

    /// The frequencies voice `voice` played in the last block.
    pub fn voice_frequencies(&self, voice: usize) -> Option<(f32, f32)> {
        self.oscillators
            .pair(voice)
            .map(|pair| (pair.frequencies().freq1, pair.frequencies().freq2))
    }
}
