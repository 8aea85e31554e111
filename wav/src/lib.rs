//! Streaming PCM manipulation for WAV audio.
//!
//! This crate reads WAV files into storage-backed [`Audio`] objects,
//! transforms them and writes them back out:
//!
//! - `metadata`: sample rate, bit depth and channel count with derived sizes
//! - `stream`: bounded-burst chunk readers and writers over a byte store
//! - `engine`: exact rational frame repetition and decimation
//! - `codec`: sample re-encoding between bit depths
//! - `transform`: speed, sample rate, bit depth, channels, volume,
//!   reversal and joining
//!
//! Payloads live in temporary files by default so memory use does not grow
//! with the file size; [`Options::in_memory`] keeps them in RAM instead.
//!
//! # Example
//!
//! ```rust
//! use giztoy_wav::{Audio, Metadata, Options, RateMode, SpeedMode};
//!
//! // Four 16-bit mono frames at 8 kHz.
//! let meta = Metadata::new(8000, 16, 1)?;
//! let pcm: Vec<u8> = [1i16, 2, 3, 4].iter().flat_map(|s| s.to_le_bytes()).collect();
//! let audio = Audio::from_pcm_with(&pcm, meta, Options::in_memory())?;
//!
//! // Upsample to 16 kHz by repeating frames.
//! let resampled = audio.change_sample_rate(16000.0, RateMode::Absolute)?;
//! assert_eq!(resampled.frame_count(), 8);
//!
//! // Play twice as fast by dropping frames.
//! let faster = audio.change_speed(2.0, SpeedMode::Count)?;
//! assert_eq!(faster.frame_count(), 2);
//! # Ok::<(), giztoy_wav::WavError>(())
//! ```

pub mod codec;
pub mod engine;
mod error;
pub mod metadata;
pub mod options;
pub mod ratio;
pub mod store;
pub mod stream;
pub mod transform;
pub mod wavfile;

mod audio;

pub use audio::Audio;
pub use error::{Result, WavError};
pub use metadata::Metadata;
pub use options::Options;
pub use ratio::Ratio;
pub use store::{Backing, Store};
pub use transform::{RateMode, SpeedMode, VolumeMode, join};
pub use wavfile::{read, read_with, write};
