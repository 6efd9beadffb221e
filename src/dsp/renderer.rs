//! WAV renderer — renders a parameter snapshot to a WAV byte buffer.

use super::polyptic::PolypticOscillator;
use super::{BLOCK_SIZE, Frame, SAMPLE_RATE};
use crate::parameters::Parameters;

/// Run a fresh engine on `params` for `blocks` blocks.
pub fn render_frames(params: &Parameters, blocks: usize) -> Vec<Frame> {
    let mut engine: PolypticOscillator = PolypticOscillator::new();
    engine.set_parameters(*params);

    let mut frames = Vec::with_capacity(blocks * BLOCK_SIZE);
    let mut block = [Frame::default(); BLOCK_SIZE];
    for _ in 0..blocks {
        engine.process(&mut block);
        frames.extend_from_slice(&block);
    }
    frames
}

/// Render `seconds` of `params` to a WAV file as bytes (16-bit stereo PCM
/// at the engine rate). The length is rounded up to whole blocks.
pub fn render_wav(params: &Parameters, seconds: f32) -> Vec<u8> {
    let samples = (seconds.max(0.0) * SAMPLE_RATE as f32).ceil() as usize;
    let blocks = samples.div_ceil(BLOCK_SIZE);
    let pcm: Vec<i16> = render_frames(params, blocks)
        .iter()
        .flat_map(|f| [f.l, f.r])
        .collect();

    encode_wav(&pcm, SAMPLE_RATE, 2)
}

/// Encode interleaved i16 PCM samples to a WAV byte buffer.
fn encode_wav(samples: &[i16], sample_rate: u32, channels: u16) -> Vec<u8> {
    let bits_per_sample: u16 = 16;
    let byte_rate = sample_rate * channels as u32 * (bits_per_sample as u32 / 8);
    let block_align = channels * (bits_per_sample / 8);
    let data_size = (samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        buf.extend_from_slice(&sample.to_le_bytes());
    }

    buf
}
