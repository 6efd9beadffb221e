//! Lookup tables, computed once on first use.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::sync::LazyLock;

use crate::fixed::{Fixed, S1_15, U0_16, U0_32};

/// Points in the sine table: 1024 segments plus the closing point.
pub const SINE_SIZE: usize = 1025;
/// Number of Chebyshev polynomials, `T1` to `T12`.
pub const CHEBY_TABLES: usize = 12;
/// Points per Chebyshev table over `x` in `[-1, 1]`.
pub const CHEBY_SIZE: usize = 513;
/// Number of quantization staircases, from identity down to five levels.
pub const CRUSH_TABLES: usize = 12;
pub const CRUSH_SIZE: usize = 513;
/// Points of the fold curve `sin(u)` over `u` in `[0, FOLD_RANGE]`.
pub const FOLD_SIZE: usize = 1025;
pub const FOLD_RANGE: f32 = 6.0 * std::f32::consts::PI;
/// Fold amounts covered by the normalization table.
pub const FOLD_MAX_SIZE: usize = 257;
/// Fold gain at amount zero.
pub const FOLD_MIN_GAIN: f32 = 0.25;

pub struct Tables {
    /// `(value, difference to the next value)` of one sine cycle.
    pub sine: [(S1_15, S1_15); SINE_SIZE],
    pub cheby: [[f32; CHEBY_SIZE]; CHEBY_TABLES],
    pub crush: [[f32; CRUSH_SIZE]; CRUSH_TABLES],
    pub fold: [f32; FOLD_SIZE],
    /// Peak of the fold curve over `x` in `[0, 1]` for each fold amount.
    pub fold_max: [f32; FOLD_MAX_SIZE],
    /// `2^((i - 128) / 12)`: whole semitones from -128 to 127.
    pub pitch_ratios_high: [f32; 256],
    /// `2^(j / 256 / 12)`: 256ths of a semitone.
    pub pitch_ratios_low: [f32; 256],
}

static TABLES: LazyLock<Box<Tables>> = LazyLock::new(|| Box::new(Tables::compute()));

/// The process-wide tables. The first call computes them.
pub fn tables() -> &'static Tables {
    &TABLES
}

/// Fold gain for a fold amount in `[0, 1]`.
pub fn fold_gain(amount: f32) -> f32 {
    FOLD_MIN_GAIN + amount * (FOLD_RANGE - FOLD_MIN_GAIN)
}

impl Tables {
    fn compute() -> Self {
        let mut sine = [(S1_15::ZERO, S1_15::ZERO); SINE_SIZE];
        let segments = (SINE_SIZE - 1) as f64;
        let value = |i: usize| S1_15::from_f32((TAU * i as f64 / segments).sin() as f32);
        for (i, entry) in sine.iter_mut().enumerate() {
            let v = value(i);
            let next = if i + 1 < SINE_SIZE { value(i + 1) } else { v };
            *entry = (v, next - v);
        }

        let mut cheby = [[0.0f32; CHEBY_SIZE]; CHEBY_TABLES];
        for i in 0..CHEBY_SIZE {
            let x = (i * 2) as f32 / (CHEBY_SIZE - 1) as f32 - 1.0;
            cheby[0][i] = x;
            cheby[1][i] = 2.0 * x * x - 1.0;
            for n in 2..CHEBY_TABLES {
                cheby[n][i] = 2.0 * x * cheby[n - 1][i] - cheby[n - 2][i];
            }
        }

        let mut crush = [[0.0f32; CRUSH_SIZE]; CRUSH_TABLES];
        for (k, table) in crush.iter_mut().enumerate() {
            for (i, point) in table.iter_mut().enumerate() {
                let x = (i * 2) as f32 / (CRUSH_SIZE - 1) as f32 - 1.0;
                *point = if k == 0 {
                    x
                } else {
                    let half_steps = (1u32 << (12 - k)) as f32;
                    (x * half_steps).round() / half_steps
                };
            }
        }

        let mut fold = [0.0f32; FOLD_SIZE];
        for (i, point) in fold.iter_mut().enumerate() {
            let u = f64::from(FOLD_RANGE) * i as f64 / (FOLD_SIZE - 1) as f64;
            *point = u.sin() as f32;
        }

        let mut fold_max = [0.0f32; FOLD_MAX_SIZE];
        for (i, point) in fold_max.iter_mut().enumerate() {
            let gain = f64::from(fold_gain(i as f32 / (FOLD_MAX_SIZE - 1) as f32));
            *point = if gain < FRAC_PI_2 { gain.sin() as f32 } else { 1.0 };
        }

        let mut pitch_ratios_high = [0.0f32; 256];
        let mut pitch_ratios_low = [0.0f32; 256];
        for i in 0..256 {
            pitch_ratios_high[i] = 2f64.powf((i as f64 - 128.0) / 12.0) as f32;
            pitch_ratios_low[i] = 2f64.powf(i as f64 / 256.0 / 12.0) as f32;
        }

        Tables {
            sine,
            cheby,
            crush,
            fold,
            fold_max,
            pitch_ratios_high,
            pitch_ratios_low,
        }
    }

    /// Band-limited sine of a phase, linearly interpolated with a single
    /// multiply.
    pub fn sine(&self, phase: U0_32) -> S1_15 {
        let indexed: Fixed<u32, 10, 22> = phase.shift_point();
        let (value, diff) = self.sine[indexed.integral() as usize];
        let frac: U0_16 = indexed.frac().wrap();
        value + diff.scale(frac)
    }
}

/// Linear interpolation of `table` at `pos` in `[0, 1]`.
pub fn interpolate(table: &[f32], pos: f32) -> f32 {
    let last = table.len().saturating_sub(1);
    if last == 0 {
        return table.first().copied().unwrap_or(0.0);
    }
    let x = pos.clamp(0.0, 1.0) * last as f32;
    let i = (x as usize).min(last - 1);
    let frac = x - i as f32;
    table[i] + (table[i + 1] - table[i]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_matches_float_sine() {
        let t = tables();
        for k in 0..4096u32 {
            let phase = U0_32::of_repr(k << 20 | 0x5a5a5);
            let expected = (TAU * phase.to_f32() as f64).sin() as f32;
            let got = t.sine(phase).to_f32();
            assert!(
                (got - expected).abs() < 1e-3,
                "sine({}) = {got}, expected {expected}",
                phase.to_f32()
            );
        }
    }

    #[test]
    fn sine_quarter_points() {
        let t = tables();
        assert_eq!(t.sine(U0_32::ZERO), S1_15::ZERO);
        assert!(t.sine(U0_32::from_f32(0.25)).to_f32() > 0.999);
        assert!(t.sine(U0_32::from_f32(0.75)).to_f32() < -0.999);
    }

    #[test]
    fn chebyshev_tables_follow_recurrence() {
        let t = tables();
        for i in 0..CHEBY_SIZE {
            let x = t.cheby[0][i];
            let theta = x.clamp(-1.0, 1.0).acos();
            for n in 0..CHEBY_TABLES {
                let expected = ((n + 1) as f32 * theta).cos();
                assert!(
                    (t.cheby[n][i] - expected).abs() < 1e-3,
                    "T{}({x}) = {}, expected {expected}",
                    n + 1,
                    t.cheby[n][i]
                );
            }
        }
    }

    #[test]
    fn crush_staircases_get_coarser() {
        let t = tables();
        let distinct = |k: usize| {
            let mut values: Vec<f32> = t.crush[k].to_vec();
            values.dedup();
            values.len()
        };
        assert_eq!(distinct(0), CRUSH_SIZE);
        for k in 1..CRUSH_TABLES {
            assert!(distinct(k) <= distinct(k - 1), "table {k} is finer than {}", k - 1);
        }
        assert_eq!(distinct(CRUSH_TABLES - 1), 5);
    }

    #[test]
    fn fold_max_normalizes_fold_peak() {
        let t = tables();
        assert!((t.fold_max[0] - FOLD_MIN_GAIN.sin()).abs() < 1e-6);
        assert_eq!(t.fold_max[FOLD_MAX_SIZE - 1], 1.0);
        assert!(t.fold_max.iter().all(|&m| m > 0.0 && m <= 1.0));
    }

    #[test]
    fn pitch_ratios_cover_semitone_range() {
        let t = tables();
        assert_eq!(t.pitch_ratios_high[128], 1.0);
        assert!((t.pitch_ratios_high[140] - 2.0).abs() < 1e-6);
        assert_eq!(t.pitch_ratios_low[0], 1.0);
        assert!(t.pitch_ratios_low[255] < 2f32.powf(1.0 / 12.0));
    }

    #[test]
    fn interpolate_hits_endpoints() {
        let table = [0.0, 1.0, 4.0];
        assert_eq!(interpolate(&table, 0.0), 0.0);
        assert_eq!(interpolate(&table, 0.25), 0.5);
        assert_eq!(interpolate(&table, 1.0), 4.0);
        assert_eq!(interpolate(&table, 2.0), 4.0);
    }
}
