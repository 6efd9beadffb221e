//! DSP Engine — fixed-point voice synthesis for the polyptic oscillator.
//!
//! Everything on the audio path works on fixed-size blocks of
//! [`BLOCK_SIZE`] samples, allocates nothing and never fails. Lookup data
//! lives in [`tables`] and is computed once at startup.

pub mod accumulators;
pub mod distortion;
pub mod filter;
pub mod mixer;
pub mod oscillator;
pub mod oscillator_pair;
pub mod oscillators;
pub mod phasor;
pub mod pitch;
pub mod polyptic;
pub mod quantizer;
pub mod renderer;
pub mod tables;
pub mod wavetable;

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 96_000;

/// Samples per audio block.
pub const BLOCK_SIZE: usize = 16;

/// Compiled voice count.
pub const NUM_OSC: usize = 16;

/// Points per wavetable cycle; the table stores one extra guard point.
pub const WAVEFORM_SIZE: usize = 256;

/// One block of samples.
pub type Block<T> = [T; BLOCK_SIZE];

/// A 16-bit stereo output frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    pub l: i16,
    pub r: i16,
}
