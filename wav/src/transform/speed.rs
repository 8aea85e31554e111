//! Playback speed changes.

use tracing::debug;

use super::SpeedMode;
use crate::audio::Audio;
use crate::engine::{self, MULTIPLIER_BOUND, Plan};
use crate::error::{Result, WavError};
use crate::ratio::Ratio;
use crate::stream;

impl Audio {
    /// Changes playback speed by `multiplier`: 2 plays twice as fast, 0.25
    /// four times slower.
    ///
    /// [`SpeedMode::Rate`] scales the sample rate and copies the payload.
    /// [`SpeedMode::Count`] keeps the sample rate and repeats or drops
    /// frames, which accepts multipliers in `[0.01, 100]` only.
    pub fn change_speed(&self, multiplier: f64, mode: SpeedMode) -> Result<Audio> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(WavError::validation(format!(
                "speed multiplier must be greater than 0, got {multiplier}"
            )));
        }
        let bound = MULTIPLIER_BOUND as f64;
        if mode == SpeedMode::Count && multiplier < 1.0 / bound {
            return Err(WavError::validation("multiplier must be at least 0.01"));
        }
        if mode == SpeedMode::Count && multiplier > bound {
            return Err(WavError::validation(format!(
                "multiplier cannot be greater than {MULTIPLIER_BOUND}"
            )));
        }

        debug!(multiplier, %mode, metadata = %self.metadata(), "wav: changing speed");
        if multiplier == 1.0 {
            return self.try_clone();
        }

        let byte_count = self.byte_count();
        let burst = self.options().burst_bytes;
        match mode {
            SpeedMode::Rate => {
                let rate = (self.metadata().sample_rate() as f64 * multiplier).round();
                if rate < 1.0 || rate > u32::MAX as f64 {
                    return Err(WavError::validation(format!(
                        "resulting sample rate {rate} is out of range"
                    )));
                }
                let metadata = self.metadata().with_sample_rate(rate as u32)?;
                self.derive(metadata, |src, dst| {
                    Ok(stream::copy(src, byte_count, dst, burst)?)
                })
            }
            SpeedMode::Count => {
                let frames = Ratio::from_f64(1.0 / multiplier, self.options().precision)?;
                let plan = Plan::new(frames)?;
                let frame_bytes = self.metadata().bytes_per_frame();
                self.derive(self.metadata(), |src, dst| {
                    engine::multiply_frames(src, byte_count, frame_bytes, plan, dst, burst)
                })
            }
        }
    }

    /// Changes the duration to `seconds` by changing playback speed.
    pub fn fit_time(&self, seconds: f64, mode: SpeedMode) -> Result<Audio> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(WavError::validation(format!(
                "'seconds' must be greater than 0, got {seconds}"
            )));
        }
        let multiplier =
            Ratio::from_f64(self.duration_secs() / seconds, self.options().precision)?.to_f64();
        debug!(seconds, multiplier, "wav: fitting duration");
        self.change_speed(multiplier, mode)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Audio, Metadata, Options, SpeedMode, WavError};

    fn audio(data: &[u8], rate: u32) -> Audio {
        let meta = Metadata::new(rate, 16, 1).unwrap();
        Audio::from_pcm_with(data, meta, Options::in_memory()).unwrap()
    }

    fn samples(values: &[i16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_identity_speed() {
        let data = samples(&[1, 2, 3, 4]);
        let src = audio(&data, 8000);
        for mode in [SpeedMode::Rate, SpeedMode::Count] {
            let out = src.change_speed(1.0, mode).unwrap();
            assert_eq!(out.to_vec().unwrap(), data);
            assert_eq!(out.metadata(), src.metadata());
        }
    }

    #[test]
    fn test_rate_mode_changes_metadata_only() {
        let data = samples(&[5, 6, 7, 8]);
        let src = audio(&data, 8000);
        let out = src.change_speed(2.0, SpeedMode::Rate).unwrap();
        assert_eq!(out.metadata().sample_rate(), 16000);
        assert_eq!(out.byte_count(), src.byte_count());
        assert_eq!(out.to_vec().unwrap(), data);
        assert_eq!(out.duration_secs(), src.duration_secs() / 2.0);
    }

    #[test]
    fn test_count_mode_changes_frames() {
        let src = audio(&samples(&[1, 2, 3, 4]), 8000);

        // Twice as fast keeps every other frame.
        let out = src.change_speed(2.0, SpeedMode::Count).unwrap();
        assert_eq!(out.metadata().sample_rate(), 8000);
        assert_eq!(out.to_vec().unwrap(), samples(&[1, 3]));

        // Half speed doubles every frame.
        let out = src.change_speed(0.5, SpeedMode::Count).unwrap();
        assert_eq!(out.to_vec().unwrap(), samples(&[1, 1, 2, 2, 3, 3, 4, 4]));
        assert_eq!(out.byte_count(), 16);
    }

    #[test]
    fn test_count_mode_bounds() {
        let src = audio(&samples(&[1, 2]), 8000);
        let err = src.change_speed(0.005, SpeedMode::Count).unwrap_err();
        assert!(matches!(err, WavError::Validation(_)));
        assert!(src.change_speed(101.0, SpeedMode::Count).is_err());
        assert!(src.change_speed(0.01, SpeedMode::Count).is_ok());
    }

    #[test]
    fn test_invalid_multiplier() {
        let src = audio(&samples(&[1, 2]), 8000);
        for m in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                src.change_speed(m, SpeedMode::Rate),
                Err(WavError::Validation(_))
            ));
        }
        // Rate mode rejects a rate that rounds to zero.
        assert!(src.change_speed(0.00001, SpeedMode::Rate).is_err());
    }

    #[test]
    fn test_fit_time() {
        // 8 frames at 8 Hz = 1 second.
        let src = audio(&samples(&[0; 8]), 8);
        let out = src.fit_time(2.0, SpeedMode::Rate).unwrap();
        assert_eq!(out.metadata().sample_rate(), 4);
        assert_eq!(out.duration_secs(), 2.0);

        let out = src.fit_time(0.5, SpeedMode::Count).unwrap();
        assert_eq!(out.frame_count(), 4);
        assert_eq!(out.duration_secs(), 0.5);
    }

    #[test]
    fn test_fit_time_rejects_non_positive() {
        let src = audio(&samples(&[0; 8]), 8);
        assert!(matches!(src.fit_time(0.0, SpeedMode::Rate), Err(WavError::Validation(_))));
        assert!(src.fit_time(-3.0, SpeedMode::Count).is_err());
    }

    #[test]
    fn test_source_untouched() {
        let data = samples(&[9, 8, 7, 6]);
        let src = audio(&data, 8000);
        let _ = src.change_speed(3.0, SpeedMode::Count).unwrap();
        assert_eq!(src.to_vec().unwrap(), data);
        assert_eq!(src.metadata().sample_rate(), 8000);
    }
}
