//! Bit depth conversion.

use tracing::debug;

use crate::audio::Audio;
use crate::codec;
use crate::error::Result;
use crate::stream::{BurstWriter, ChunkReader};

impl Audio {
    /// Re-encodes every sample at `bit_depth` bits (8, 16, 24 or 32).
    ///
    /// Values are scaled by `2^(new - old)`; 8-bit output is unsigned as
    /// WAV requires.
    pub fn change_bit_depth(&self, bit_depth: u16) -> Result<Audio> {
        codec::validate_depth(bit_depth)?;
        let from = self.metadata().bit_depth();
        if bit_depth == from {
            return self.try_clone();
        }

        let metadata = self.metadata().with_bit_depth(bit_depth)?;
        debug!(from, to = bit_depth, "wav: changing bit depth");

        let byte_count = self.byte_count();
        let sample_bytes = self.metadata().bytes_per_sample();
        let burst = self.options().burst_bytes;
        self.derive(metadata, |src, dst| {
            let mut reader = ChunkReader::new(src, byte_count, sample_bytes, burst)?;
            let mut writer = BurstWriter::new(dst, burst);
            while let Some(sample) = reader.next_chunk()? {
                codec::convert(sample, from, bit_depth, writer.pending());
                writer.commit()?;
            }
            Ok(writer.finish()?)
        })
    }
}
