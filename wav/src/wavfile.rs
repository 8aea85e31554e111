//! WAV container reading and writing.
//!
//! The container itself is handled by `hound`; this module moves samples
//! between the container and an [`Audio`] store in bounded bursts.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::debug;

use crate::audio::Audio;
use crate::codec;
use crate::error::{Result, WavError};
use crate::metadata::Metadata;
use crate::options::Options;
use crate::stream::{BurstWriter, ChunkReader};

/// Reads a WAV file with default options.
pub fn read(path: impl AsRef<Path>) -> Result<Audio> {
    read_with(path, Options::default())
}

/// Reads a WAV file, storing the PCM payload as configured by `options`.
///
/// Fails with [`WavError::NotFound`] when `path` is not a regular file and
/// with [`WavError::Unsupported`] for float or non-byte-aligned samples.
pub fn read_with(path: impl AsRef<Path>, options: Options) -> Result<Audio> {
    let path = path.as_ref();
    options.validate()?;
    if !path.is_file() {
        return Err(WavError::NotFound(path.to_path_buf()));
    }

    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int {
        return Err(WavError::Unsupported("floating point samples".to_string()));
    }
    let metadata = Metadata::new(spec.sample_rate, spec.bits_per_sample, spec.channels)
        .map_err(|e| WavError::Unsupported(format!("{spec:?}: {e}")))?;
    let bits = metadata.bit_depth();

    let mut store = options.create_store()?;
    let byte_count = {
        let mut writer = BurstWriter::new(&mut *store, options.burst_bytes);
        for sample in reader.samples::<i32>() {
            codec::encode(sample? as i64, bits, writer.pending());
            writer.commit()?;
        }
        writer.finish()?
    };
    debug!(path = %path.display(), %metadata, byte_count, "wav: read");

    Audio::from_store(store, byte_count, metadata, options)
}

/// Writes `audio` to `path` as a PCM WAV file.
///
/// An existing file is replaced unless `overwrite` is false, in which case
/// [`WavError::AlreadyExists`] is returned and nothing is written.
pub fn write(audio: &Audio, path: impl AsRef<Path>, overwrite: bool) -> Result<()> {
    let path = path.as_ref();
    if !overwrite && path.exists() {
        return Err(WavError::AlreadyExists(path.to_path_buf()));
    }

    let metadata = audio.metadata();
    let spec = WavSpec {
        channels: metadata.channels(),
        sample_rate: metadata.sample_rate(),
        bits_per_sample: metadata.bit_depth(),
        sample_format: SampleFormat::Int,
    };
    let bits = metadata.bit_depth();
    let sample_bytes = metadata.bytes_per_sample();
    let frame_bytes = metadata.bytes_per_frame();
    // Whole frames per burst so no sample straddles two bursts.
    let burst = (audio.options().burst_bytes / frame_bytes).max(1) * frame_bytes;

    let mut writer = WavWriter::create(path, spec)?;
    {
        let mut store = audio.store();
        let mut reader = ChunkReader::new(&mut **store, audio.byte_count(), burst, burst)?;
        while let Some(chunk) = reader.next_chunk()? {
            for sample in chunk.chunks_exact(sample_bytes) {
                writer.write_sample(codec::decode(sample, bits) as i32)?;
            }
        }
    }
    writer.finalize()?;
    debug!(path = %path.display(), %metadata, byte_count = audio.byte_count(), "wav: wrote");
    Ok(())
}
