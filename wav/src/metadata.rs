//! PCM stream metadata.

use std::fmt;
use std::time::Duration;

use crate::codec;
use crate::error::{Result, WavError};

/// Describes a raw PCM stream: sample rate, bit depth and channel count.
///
/// Immutable once constructed. The `with_*` methods return new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Metadata {
    sample_rate: u32,
    bit_depth: u16,
    channels: u16,
}

impl Metadata {
    /// Creates metadata after validating every field.
    pub fn new(sample_rate: u32, bit_depth: u16, channels: u16) -> Result<Self> {
        if sample_rate < 1 {
            return Err(WavError::validation("sample rate must be at least 1"));
        }
        codec::validate_depth(bit_depth)?;
        if channels < 1 {
            return Err(WavError::validation("channel count must be at least 1"));
        }
        Ok(Self {
            sample_rate,
            bit_depth,
            channels,
        })
    }

    /// Samples per second per channel (Hz).
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Bits per sample.
    pub fn bit_depth(&self) -> u16 {
        self.bit_depth
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn bytes_per_sample(&self) -> usize {
        self.bit_depth as usize / 8
    }

    /// Bytes for one sample of every channel.
    pub fn bytes_per_frame(&self) -> usize {
        self.bytes_per_sample() * self.channels as usize
    }

    /// Bits of data per second of audio.
    pub fn bitrate(&self) -> u64 {
        self.sample_rate as u64 * self.bit_depth as u64 * self.channels as u64
    }

    /// Bytes of data per second of audio.
    pub fn byte_rate(&self) -> u64 {
        self.bitrate() / 8
    }

    /// Number of whole frames in `byte_count` bytes.
    pub fn frames(&self, byte_count: u64) -> u64 {
        byte_count / self.bytes_per_frame() as u64
    }

    /// Seconds of audio in `byte_count` bytes.
    pub fn duration_secs(&self, byte_count: u64) -> f64 {
        byte_count as f64 / self.bytes_per_frame() as f64 / self.sample_rate as f64
    }

    /// Duration of `byte_count` bytes, truncated to whole nanoseconds.
    pub fn duration(&self, byte_count: u64) -> Duration {
        let frames = self.frames(byte_count) as u128;
        let nanos = frames * 1_000_000_000 / self.sample_rate as u128;
        Duration::from_nanos(nanos as u64)
    }

    pub fn with_sample_rate(&self, sample_rate: u32) -> Result<Self> {
        Self::new(sample_rate, self.bit_depth, self.channels)
    }

    pub fn with_bit_depth(&self, bit_depth: u16) -> Result<Self> {
        Self::new(self.sample_rate, bit_depth, self.channels)
    }

    pub fn with_channels(&self, channels: u16) -> Result<Self> {
        Self::new(self.sample_rate, self.bit_depth, channels)
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}Hz {}-bit {}ch",
            self.sample_rate, self.bit_depth, self.channels
        )
    }
}
