//! Volume attenuation.

use tracing::debug;

use super::VolumeMode;
use crate::audio::Audio;
use crate::codec;
use crate::error::{Result, WavError};
use crate::stream::{BurstWriter, ChunkReader};

/// Converts an attenuation in decibels to an amplitude factor.
pub fn decibels_to_multiplier(decibels: f64) -> f64 {
    1.0 / 10f64.powf(decibels / 10.0)
}

impl Audio {
    /// Makes the audio quieter.
    ///
    /// With [`VolumeMode::Multiplier`] every sample is multiplied by `value`,
    /// which must lie strictly between 0 and 1. With [`VolumeMode::Decibels`]
    /// `value` is a positive attenuation converted by
    /// [`decibels_to_multiplier`]. Scaled values are truncated toward zero.
    pub fn decrease_volume(&self, value: f64, mode: VolumeMode) -> Result<Audio> {
        let multiplier = match mode {
            VolumeMode::Multiplier => {
                if !(value > 0.0 && value < 1.0) {
                    return Err(WavError::validation(format!(
                        "volume multiplier must be between 0 and 1 exclusive, got {value}"
                    )));
                }
                value
            }
            VolumeMode::Decibels => {
                if !value.is_finite() || value <= 0.0 {
                    return Err(WavError::validation(format!(
                        "decibels must be greater than 0, got {value}"
                    )));
                }
                decibels_to_multiplier(value)
            }
        };
        debug!(value, %mode, multiplier, "wav: decreasing volume");

        let bits = self.metadata().bit_depth();
        let byte_count = self.byte_count();
        let sample_bytes = self.metadata().bytes_per_sample();
        let burst = self.options().burst_bytes;
        self.derive(self.metadata(), |src, dst| {
            let mut reader = ChunkReader::new(src, byte_count, sample_bytes, burst)?;
            let mut writer = BurstWriter::new(dst, burst);
            while let Some(sample) = reader.next_chunk()? {
                codec::scale(sample, bits, multiplier, writer.pending());
                writer.commit()?;
            }
            Ok(writer.finish()?)
        })
    }
}
