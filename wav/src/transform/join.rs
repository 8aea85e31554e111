//! Concatenation.

use tracing::debug;

use super::RateMode;
use crate::audio::Audio;
use crate::error::{Result, WavError};
use crate::metadata::Metadata;
use crate::stream;

/// Concatenates `audios` in order into one stream described by `target`.
///
/// Each input is first converted to the target sample rate, bit depth and
/// channel count. Channels are taken in order: a stereo input joined into
/// mono contributes its first channel. The result uses the options of the
/// first input.
pub fn join(audios: &[Audio], target: Metadata) -> Result<Audio> {
    let first = audios
        .first()
        .ok_or_else(|| WavError::validation("join needs at least one audio object"))?;
    debug!(inputs = audios.len(), %target, "wav: joining");

    let normalized = audios
        .iter()
        .map(|audio| normalize(audio, target))
        .collect::<Result<Vec<_>>>()?;

    let options = first.options();
    let mut dst = options.create_store()?;
    let mut byte_count = 0;
    for audio in &normalized {
        let mut src = audio.store();
        byte_count += stream::copy(&mut **src, audio.byte_count(), &mut *dst, options.burst_bytes)?;
    }
    Audio::from_store(dst, byte_count, target, options)
}

fn normalize(audio: &Audio, target: Metadata) -> Result<Audio> {
    audio
        .change_sample_rate(target.sample_rate() as f64, RateMode::Absolute)?
        .change_bit_depth(target.bit_depth())?
        .change_channel_count(target.channels())
}
