//! Audio transforms.
//!
//! Every transform validates its parameters before touching storage and
//! returns a new [`Audio`](crate::Audio); the source is left untouched.
//!
//! - [`Audio::change_speed`](crate::Audio::change_speed) / [`Audio::fit_time`](crate::Audio::fit_time)
//! - [`Audio::change_sample_rate`](crate::Audio::change_sample_rate)
//! - [`Audio::change_bit_depth`](crate::Audio::change_bit_depth)
//! - [`Audio::to_mono`](crate::Audio::to_mono) / [`Audio::change_channel_count`](crate::Audio::change_channel_count)
//! - [`Audio::decrease_volume`](crate::Audio::decrease_volume)
//! - [`Audio::reverse`](crate::Audio::reverse)
//! - [`join`]

mod channels;
mod depth;
mod join;
mod resample;
mod reverse;
mod speed;
mod volume;

pub use join::join;
pub use volume::decibels_to_multiplier;

use std::fmt;
use std::str::FromStr;

use crate::error::WavError;

/// How [`Audio::change_speed`](crate::Audio::change_speed) alters playback speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedMode {
    /// Scale the sample rate; the payload is copied unchanged.
    #[default]
    Rate,
    /// Keep the sample rate and repeat or drop frames.
    Count,
}

/// How the value passed to
/// [`Audio::change_sample_rate`](crate::Audio::change_sample_rate) is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateMode {
    /// The value is the new rate in Hz.
    #[default]
    Absolute,
    /// The value multiplies the current rate.
    Multiplier,
}

/// How the value passed to
/// [`Audio::decrease_volume`](crate::Audio::decrease_volume) is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VolumeMode {
    /// Amplitude factor in `(0, 1)`.
    #[default]
    Multiplier,
    /// Attenuation in decibels, greater than 0.
    Decibels,
}

macro_rules! string_mode {
    ($ty:ident, $label:literal, $($variant:ident => $name:literal),+ $(,)?) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = WavError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(WavError::validation(format!(
                        concat!("'", $label, "' must be one of ", $("'", $name, "' ",)+ "got {:?}"),
                        s
                    ))),
                }
            }
        }
    };
}

string_mode!(SpeedMode, "change_sample", Rate => "rate", Count => "count");
string_mode!(RateMode, "mode", Absolute => "absolute", Multiplier => "multiplier");
string_mode!(VolumeMode, "mode", Multiplier => "multiplier", Decibels => "decibels");
