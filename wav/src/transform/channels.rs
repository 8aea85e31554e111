//! Channel selection.

use tracing::debug;

use crate::audio::Audio;
use crate::error::{Result, WavError};
use crate::stream::{BurstWriter, ChunkReader};

impl Audio {
    /// Keeps a single channel. `channel` is 1-based.
    pub fn to_mono(&self, channel: u16) -> Result<Audio> {
        let channels = self.metadata().channels();
        if channel < 1 || channel > channels {
            return Err(WavError::validation(format!(
                "channel number must be between 1 and {channels}, got {channel}"
            )));
        }
        if channels == 1 {
            return self.try_clone();
        }
        debug!(channel, channels, "wav: extracting channel");
        self.select_channels(&[channel as usize - 1])
    }

    /// Changes the channel count to `channels`.
    ///
    /// Reducing keeps the first `channels` channels in order. Growing
    /// repeats the existing channels cyclically, so mono becomes identical
    /// left and right.
    pub fn change_channel_count(&self, channels: u16) -> Result<Audio> {
        if channels < 1 {
            return Err(WavError::validation("channel count must be at least 1"));
        }
        let current = self.metadata().channels();
        if channels == current {
            return self.try_clone();
        }
        debug!(from = current, to = channels, "wav: changing channel count");
        let layout: Vec<usize> = (0..channels as usize)
            .map(|c| c % current as usize)
            .collect();
        self.select_channels(&layout)
    }

    /// Builds frames from the listed source channels (0-based), in order.
    fn select_channels(&self, layout: &[usize]) -> Result<Audio> {
        let channels = u16::try_from(layout.len())
            .map_err(|_| WavError::validation("too many channels"))?;
        let metadata = self.metadata().with_channels(channels)?;

        let byte_count = self.byte_count();
        let frame_bytes = self.metadata().bytes_per_frame();
        let sample_bytes = self.metadata().bytes_per_sample();
        let burst = self.options().burst_bytes;
        self.derive(metadata, |src, dst| {
            let mut reader = ChunkReader::new(src, byte_count, frame_bytes, burst)?;
            let mut writer = BurstWriter::new(dst, burst);
            while let Some(frame) = reader.next_chunk()? {
                for &ch in layout {
                    let start = ch * sample_bytes;
                    writer.pending().extend_from_slice(&frame[start..start + sample_bytes]);
                }
                writer.commit()?;
            }
            Ok(writer.finish()?)
        })
    }
}
