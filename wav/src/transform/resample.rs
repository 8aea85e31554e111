//! Sample rate conversion by frame repetition and decimation.

use tracing::debug;

use super::RateMode;
use crate::audio::Audio;
use crate::engine::{self, Plan};
use crate::error::{Result, WavError};
use crate::ratio::Ratio;

impl Audio {
    /// Changes the number of samples per second while keeping playback
    /// speed and pitch.
    ///
    /// With [`RateMode::Absolute`] `value` is the new rate in Hz (rounded);
    /// with [`RateMode::Multiplier`] it scales the current rate. Frames are
    /// repeated or dropped by the exact ratio `new_rate / old_rate`; no
    /// interpolation or filtering is applied.
    pub fn change_sample_rate(&self, value: f64, mode: RateMode) -> Result<Audio> {
        if !value.is_finite() {
            return Err(WavError::validation(format!(
                "sample rate value must be finite, got {value}"
            )));
        }
        let current = self.metadata().sample_rate();
        let target = match mode {
            RateMode::Absolute => value.round(),
            RateMode::Multiplier => {
                if value <= 0.0 {
                    return Err(WavError::validation(format!(
                        "sample rate multiplier must be greater than 0, got {value}"
                    )));
                }
                (current as f64 * value).round()
            }
        };
        if target < 1.0 {
            return Err(WavError::validation(format!("new sample rate {target} is too low")));
        }
        if target > u32::MAX as f64 {
            return Err(WavError::validation(format!("new sample rate {target} is too high")));
        }
        let target = target as u32;

        if target == current {
            return self.try_clone();
        }

        let plan = Plan::new(Ratio::new(target as u64, current as u64)?)?;
        let metadata = self.metadata().with_sample_rate(target)?;
        debug!(from = current, to = target, %mode, "wav: changing sample rate");

        let byte_count = self.byte_count();
        let frame_bytes = self.metadata().bytes_per_frame();
        let burst = self.options().burst_bytes;
        self.derive(metadata, |src, dst| {
            engine::multiply_frames(src, byte_count, frame_bytes, plan, dst, burst)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Audio, Metadata, Options, RateMode, WavError};

    fn audio(frames: &[u8], rate: u32) -> Audio {
        let meta = Metadata::new(rate, 8, 1).unwrap();
        Audio::from_pcm_with(frames, meta, Options::in_memory()).unwrap()
    }

    #[test]
    fn test_upsample_absolute() {
        let src = audio(&[10, 20, 30, 40], 2);
        let out = src.change_sample_rate(3.0, RateMode::Absolute).unwrap();
        assert_eq!(out.metadata().sample_rate(), 3);
        assert_eq!(out.to_vec().unwrap(), vec![10, 10, 20, 30, 30, 40]);
        assert_eq!(out.duration_secs(), src.duration_secs());
    }

    #[test]
    fn test_downsample_multiplier() {
        let src = audio(&[1, 2, 3, 4, 5, 6, 7, 8], 8);
        let out = src.change_sample_rate(0.5, RateMode::Multiplier).unwrap();
        assert_eq!(out.metadata().sample_rate(), 4);
        assert_eq!(out.to_vec().unwrap(), vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_integer_multiplier() {
        let src = audio(&[1, 2], 4000);
        let out = src.change_sample_rate(2.0, RateMode::Multiplier).unwrap();
        assert_eq!(out.metadata().sample_rate(), 8000);
        assert_eq!(out.to_vec().unwrap(), vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_same_rate_copies() {
        let src = audio(&[1, 2, 3], 44100);
        let out = src.change_sample_rate(44100.4, RateMode::Absolute).unwrap();
        assert_eq!(out.metadata(), src.metadata());
        assert_eq!(out.to_vec().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_44k_to_48k_frame_count() {
        let src = audio(&vec![0x80; 44100], 44100);
        let out = src.change_sample_rate(48000.0, RateMode::Absolute).unwrap();
        assert_eq!(out.frame_count(), 48000);
    }

    #[test]
    fn test_invalid_rates() {
        let src = audio(&[1, 2], 8000);
        assert!(matches!(
            src.change_sample_rate(0.0, RateMode::Absolute),
            Err(WavError::Validation(_))
        ));
        assert!(src.change_sample_rate(0.4, RateMode::Absolute).is_err());
        assert!(src.change_sample_rate(0.0, RateMode::Multiplier).is_err());
        assert!(src.change_sample_rate(-2.0, RateMode::Multiplier).is_err());
        // Ratio beyond the engine bound.
        assert!(src.change_sample_rate(8000.0 * 101.0, RateMode::Absolute).is_err());
    }
}
