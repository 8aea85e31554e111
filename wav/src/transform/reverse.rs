//! Frame reversal.

use tracing::debug;

use crate::audio::Audio;
use crate::error::Result;
use crate::stream::{BurstWriter, ReverseChunkReader};

impl Audio {
    /// Plays the audio backwards: the last frame comes first.
    pub fn reverse(&self) -> Result<Audio> {
        debug!(frames = self.frame_count(), "wav: reversing");
        let byte_count = self.byte_count();
        let frame_bytes = self.metadata().bytes_per_frame();
        let burst = self.options().burst_bytes;
        self.derive(self.metadata(), |src, dst| {
            let mut reader = ReverseChunkReader::new(src, byte_count, frame_bytes, burst);
            let mut writer = BurstWriter::new(dst, burst);
            while let Some(frame) = reader.next_chunk()? {
                writer.write(frame)?;
            }
            Ok(writer.finish()?)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Audio, Metadata, Options};

    #[test]
    fn test_reverse_frames() {
        let meta = Metadata::new(8000, 16, 2).unwrap();
        let data: Vec<u8> = (0..12).collect();
        let src = Audio::from_pcm_with(&data, meta, Options::in_memory()).unwrap();
        let out = src.reverse().unwrap();
        assert_eq!(out.to_vec().unwrap(), vec![8, 9, 10, 11, 4, 5, 6, 7, 0, 1, 2, 3]);
        assert_eq!(out.metadata(), meta);
    }

    #[test]
    fn test_reverse_is_involution() {
        let meta = Metadata::new(8000, 24, 1).unwrap();
        let data: Vec<u8> = (0..=255).cycle().take(3 * 1000).collect();
        let opts = Options::in_memory().with_burst_bytes(100);
        let src = Audio::from_pcm_with(&data, meta, opts).unwrap();
        let twice = src.reverse().unwrap().reverse().unwrap();
        assert_eq!(twice.to_vec().unwrap(), data);
    }

    #[test]
    fn test_reverse_empty() {
        let meta = Metadata::new(8000, 8, 1).unwrap();
        let src = Audio::from_pcm_with(&[], meta, Options::in_memory()).unwrap();
        assert_eq!(src.reverse().unwrap().byte_count(), 0);
    }
}
