//! Scale quantizer.
//!
//! A [`Grid`] is a list of pitch offsets in semitones, starting at 0 and
//! ending at the octave span of the scale. [`Grid::process`] folds a pitch
//! into one span, finds the two scale steps around it and reports how far
//! between them the pitch sits. The two steps feed the two oscillators of a
//! voice and the position becomes their crossfade.
//!
//! Scales can also be learned: notes played while learning are collected in
//! a [`PreGrid`] and committed into a new grid.

use crate::error::{GridError, LearnError};
use crate::parameters::{GRID_SLOTS, MAX_PITCH};

/// Largest number of offsets in a scale, span included.
pub const MAX_GRID_SIZE: usize = 32;

/// Learned notes closer than this to the previous one are merged into it.
pub const DEDUP_THRESHOLD: f32 = 0.1;

/// Result of quantizing one pitch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuantizedPitch {
    pub p1: f32,
    pub p2: f32,
    /// Weight of `p2`, in `[0, 1]`.
    pub crossfade: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    offsets: [f32; MAX_GRID_SIZE],
    size: usize,
}

impl Grid {
    /// Validate and build a scale: 2 to 32 strictly ascending offsets
    /// starting at 0. The last offset is the span at which the scale repeats.
    pub fn new(offsets: &[f32]) -> Result<Self, GridError> {
        if !(2..=MAX_GRID_SIZE).contains(&offsets.len()) {
            return Err(GridError::Size {
                len: offsets.len(),
                max: MAX_GRID_SIZE,
            });
        }
        if offsets[0] != 0.0 {
            return Err(GridError::Origin { first: offsets[0] });
        }
        if let Some(index) = offsets.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(GridError::NotAscending { index: index + 1 });
        }
        Ok(Self::from_ascending(offsets))
    }

    fn from_ascending(offsets: &[f32]) -> Self {
        let mut grid = Grid {
            offsets: [0.0; MAX_GRID_SIZE],
            size: offsets.len(),
        };
        grid.offsets[..offsets.len()].copy_from_slice(offsets);
        grid
    }

    /// The built-in scales, one per grid slot.
    pub fn presets() -> [Grid; GRID_SLOTS] {
        [
            // octave
            Self::from_ascending(&[0.0, 12.0]),
            // fifths
            Self::from_ascending(&[0.0, 7.0, 12.0]),
            // major triad
            Self::from_ascending(&[0.0, 4.0, 7.0, 12.0]),
            // minor triad
            Self::from_ascending(&[0.0, 3.0, 7.0, 12.0]),
            // dominant seventh
            Self::from_ascending(&[0.0, 4.0, 7.0, 10.0, 12.0]),
            // major pentatonic
            Self::from_ascending(&[0.0, 2.0, 4.0, 7.0, 9.0, 12.0]),
            // whole tone
            Self::from_ascending(&[0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0]),
            // major scale
            Self::from_ascending(&[0.0, 2.0, 4.0, 5.0, 7.0, 9.0, 11.0, 12.0]),
            // harmonics 1 to 4
            Self::from_ascending(&[0.0, 12.0, 19.02, 24.0]),
            // chromatic
            Self::from_ascending(&[
                0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0,
            ]),
        ]
    }

    pub fn offsets(&self) -> &[f32] {
        &self.offsets[..self.size]
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Interval at which the scale repeats.
    pub fn span(&self) -> f32 {
        self.offsets[self.size - 1]
    }

    /// Quantize a pitch to the two scale steps around it.
    ///
    /// When the step index plus `octave * (size + 1)` is odd, the steps are
    /// swapped and the crossfade complemented, so the two oscillators of a
    /// voice take turns holding the settled pitch as it climbs the scale.
    pub fn process(&self, pitch: f32) -> QuantizedPitch {
        let pitch = if pitch.is_nan() { 0.0 } else { pitch.clamp(-MAX_PITCH, MAX_PITCH) };
        let span = self.span();

        let mut octave = (pitch / span).floor();
        let mut semitones = pitch - octave * span;
        if semitones >= span {
            semitones -= span;
            octave += 1.0;
        } else if semitones < 0.0 {
            semitones += span;
            octave -= 1.0;
        }
        let semitones = semitones.clamp(0.0, span);

        let offsets = self.offsets();
        let (mut lo, mut hi) = (0, self.size - 1);
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if offsets[mid] <= semitones {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let base = octave * span;
        let (low, high) = (offsets[lo], offsets[lo + 1]);
        let mut q = QuantizedPitch {
            p1: low + base,
            p2: high + base,
            crossfade: ((semitones - low) / (high - low)).clamp(0.0, 1.0),
        };

        let parity = (lo as i64 + octave as i64 * (self.size as i64 + 1)).rem_euclid(2);
        if parity == 1 {
            std::mem::swap(&mut q.p1, &mut q.p2);
            q.crossfade = 1.0 - q.crossfade;
        }
        q
    }
}

/// Notes collected while learning a scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreGrid {
    pitches: [f32; MAX_GRID_SIZE],
    len: usize,
}

impl Default for PreGrid {
    fn default() -> Self {
        PreGrid {
            pitches: [0.0; MAX_GRID_SIZE],
            len: 0,
        }
    }
}

impl PreGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Record a note. Non-finite pitches are ignored.
    pub fn add(&mut self, pitch: f32) -> Result<(), LearnError> {
        if !pitch.is_finite() {
            return Ok(());
        }
        if self.len == MAX_GRID_SIZE {
            return Err(LearnError::PreGridFull { capacity: MAX_GRID_SIZE });
        }
        self.pitches[self.len] = pitch;
        self.len += 1;
        Ok(())
    }

    /// Turn the recorded notes into a scale: sort them, shift them to start
    /// at 0 and merge each run of notes closer than [`DEDUP_THRESHOLD`] into
    /// its first note. The highest note becomes the span.
    pub fn commit(&self) -> Result<Grid, LearnError> {
        let mut sorted = self.pitches;
        let notes = &mut sorted[..self.len];
        notes.sort_by(f32::total_cmp);

        let mut kept = [0.0f32; MAX_GRID_SIZE];
        let mut distinct = 0;
        if let Some(&lowest) = notes.first() {
            let mut previous = f32::NEG_INFINITY;
            for &note in notes.iter() {
                let offset = note - lowest;
                if offset - previous >= DEDUP_THRESHOLD {
                    kept[distinct] = offset;
                    distinct += 1;
                }
                previous = offset;
            }
        }

        if distinct < 2 {
            return Err(LearnError::TooFewNotes { distinct });
        }
        Ok(Grid::from_ascending(&kept[..distinct]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(offsets: &[f32]) -> Grid {
        Grid::new(offsets).expect("valid grid")
    }

    #[test]
    fn octave_shift_consistency() {
        let g = grid(&[0.0, 7.0, 12.0]);
        let a = g.process(3.5);
        let b = g.process(15.5);
        assert_eq!(a.crossfade, b.crossfade);
        assert_eq!(b.p1 - a.p1, 12.0);
        assert_eq!(b.p2 - a.p2, 12.0);
    }

    #[test]
    fn octave_shift_holds_for_every_preset() {
        for (slot, g) in Grid::presets().iter().enumerate() {
            let span = g.span();
            for k in 0..40 {
                let pitch = k as f32 * 0.37 + 0.013;
                let a = g.process(pitch);
                let b = g.process(pitch + span);
                assert!(
                    (a.crossfade - b.crossfade).abs() < 1e-3
                        || (a.crossfade + b.crossfade - 1.0).abs() < 1e-3,
                    "slot {slot} at {pitch}: {a:?} vs {b:?}"
                );
                let (a_lo, a_hi) = (a.p1.min(a.p2), a.p1.max(a.p2));
                let (b_lo, b_hi) = (b.p1.min(b.p2), b.p1.max(b.p2));
                assert!((b_lo - a_lo - span).abs() < 1e-3, "slot {slot} at {pitch}");
                assert!((b_hi - a_hi - span).abs() < 1e-3, "slot {slot} at {pitch}");
            }
        }
    }

    #[test]
    fn grid_boundary_is_exact() {
        let g = grid(&[0.0, 4.0, 7.0, 12.0]);
        let q = g.process(4.0);
        assert!(q.crossfade == 0.0 || q.crossfade == 1.0, "crossfade {}", q.crossfade);
        assert!(q.p1 == 4.0 || q.p2 == 4.0, "{q:?}");
        // The settled pitch is the one carrying the weight.
        let settled = if q.crossfade == 1.0 { q.p2 } else { q.p1 };
        assert_eq!(settled, 4.0);
    }

    #[test]
    fn odd_step_swaps_the_pair() {
        let g = grid(&[0.0, 4.0, 7.0, 12.0]);
        let even = g.process(2.0);
        assert_eq!((even.p1, even.p2, even.crossfade), (0.0, 4.0, 0.5));
        let odd = g.process(5.5);
        assert_eq!((odd.p1, odd.p2, odd.crossfade), (7.0, 4.0, 0.5));
    }

    #[test]
    fn negative_pitches_fold_down() {
        let g = grid(&[0.0, 7.0, 12.0]);
        let q = g.process(-2.5);
        let (lo, hi) = (q.p1.min(q.p2), q.p1.max(q.p2));
        assert_eq!((lo, hi), (-5.0, 0.0));
        let weight_on_hi = if q.p2 == hi { q.crossfade } else { 1.0 - q.crossfade };
        assert!((weight_on_hi - 0.5).abs() < 1e-6);
    }

    #[test]
    fn extreme_pitches_saturate() {
        let g = grid(&[0.0, 12.0]);
        assert_eq!(g.process(1e9), g.process(MAX_PITCH));
        assert_eq!(g.process(-1e9), g.process(-MAX_PITCH));
        let q = g.process(f32::NAN);
        assert!(q.crossfade.is_finite());
    }

    #[test]
    fn invalid_grids_are_rejected() {
        assert!(matches!(Grid::new(&[0.0]), Err(GridError::Size { len: 1, .. })));
        assert!(matches!(Grid::new(&[1.0, 12.0]), Err(GridError::Origin { .. })));
        assert!(matches!(
            Grid::new(&[0.0, 7.0, 7.0, 12.0]),
            Err(GridError::NotAscending { index: 2 })
        ));
        assert!(Grid::new(&[0.0; 33]).is_err());
    }

    #[test]
    fn presets_are_valid_scales() {
        for (slot, g) in Grid::presets().iter().enumerate() {
            assert_eq!(Grid::new(g.offsets()).as_ref(), Ok(g), "slot {slot}");
        }
        assert_eq!(Grid::presets()[9].len(), 13);
        assert_eq!(Grid::presets()[8].span(), 24.0);
    }

    #[test]
    fn pregrid_dedup_clusters_close_notes() {
        let mut pre = PreGrid::new();
        for pitch in [5.0, 0.02, 4.98, 12.1] {
            pre.add(pitch).expect("room for notes");
        }
        let g = pre.commit().expect("enough distinct notes");
        // Sorted and shifted: [0, 4.96, 4.98, 12.08]; 4.98 merges into 4.96.
        assert_eq!(g.len(), 3);
        assert_eq!(g.offsets()[0], 0.0);
        assert!((g.offsets()[1] - 4.96).abs() < 1e-4);
        assert!((g.span() - 12.08).abs() < 1e-4);
    }

    #[test]
    fn pregrid_rejects_too_few_notes() {
        let mut pre = PreGrid::new();
        assert_eq!(pre.commit(), Err(LearnError::TooFewNotes { distinct: 0 }));
        pre.add(60.0).expect("room");
        pre.add(60.05).expect("room");
        assert_eq!(pre.commit(), Err(LearnError::TooFewNotes { distinct: 1 }));
    }

    #[test]
    fn pregrid_is_bounded() {
        let mut pre = PreGrid::new();
        for i in 0..MAX_GRID_SIZE {
            pre.add(i as f32).expect("room");
        }
        assert_eq!(
            pre.add(99.0),
            Err(LearnError::PreGridFull { capacity: MAX_GRID_SIZE })
        );
        let g = pre.commit().expect("32 distinct notes");
        assert_eq!(g.len(), MAX_GRID_SIZE);
        pre.clear();
        assert!(pre.is_empty());
    }
}
