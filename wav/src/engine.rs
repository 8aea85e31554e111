//! Rational frame multiplier.
//!
//! Grows or shrinks a frame stream by a rational factor by repeating or
//! dropping whole frames. For a factor with integer part `lower` and
//! reduced fractional part `numer/denom`, frame `i` is emitted `lower + 1`
//! times when `(i * numer) mod denom < numer` and `lower` times otherwise.
//! The extra repetitions are spread evenly over the stream, Bresenham
//! style, and the arithmetic is exact for any stream length.

use std::io::{Read, Seek, Write};

use tracing::debug;

use crate::error::{Result, WavError};
use crate::ratio::Ratio;
use crate::stream::{self, BurstWriter, ChunkReader};

/// Multipliers are accepted in `[1 / MULTIPLIER_BOUND, MULTIPLIER_BOUND]`.
/// Outside this range the frame count explodes or collapses to nothing.
pub const MULTIPLIER_BOUND: u64 = 100;

/// How each input frame maps to output frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Multiplier of exactly one: a straight copy.
    Identity,
    /// Every frame repeated `k` times.
    Repeat(u64),
    /// Frames repeated `lower` or `lower + 1` times by the modular rule.
    Ration { lower: u64, numer: u64, denom: u64 },
}

impl Plan {
    /// Builds the plan for `multiplier`, rejecting factors outside
    /// `[0.01, 100]`.
    pub fn new(multiplier: Ratio) -> Result<Self> {
        if multiplier < Ratio::new(1, MULTIPLIER_BOUND)? {
            return Err(WavError::validation(format!(
                "multiplier must be at least 0.01, got {:.10}",
                multiplier.to_f64()
            )));
        }
        if multiplier > Ratio::new(MULTIPLIER_BOUND, 1)? {
            return Err(WavError::validation(format!(
                "multiplier cannot be greater than {MULTIPLIER_BOUND}, got {:.10}",
                multiplier.to_f64()
            )));
        }

        if multiplier == Ratio::ONE {
            return Ok(Plan::Identity);
        }
        if multiplier.is_integer() {
            return Ok(Plan::Repeat(multiplier.floor()));
        }
        let fract = multiplier.fract();
        Ok(Plan::Ration {
            lower: multiplier.floor(),
            numer: fract.numer(),
            denom: fract.denom(),
        })
    }

    /// Copies emitted for the frame at `index`.
    pub fn repeat_count(&self, index: u64) -> u64 {
        match *self {
            Plan::Identity => 1,
            Plan::Repeat(k) => k,
            Plan::Ration { lower, numer, denom } => {
                let phase = (index as u128 * numer as u128) % denom as u128;
                if phase < numer as u128 { lower + 1 } else { lower }
            }
        }
    }

    /// Repeat counts for frames `0, 1, 2, ...`.
    pub fn repeats(&self) -> Repeats {
        Repeats {
            plan: *self,
            phase: 0,
        }
    }

    /// Exact number of frames produced from `frames` input frames.
    pub fn output_frames(&self, frames: u64) -> u64 {
        match *self {
            Plan::Identity => frames,
            Plan::Repeat(k) => frames * k,
            Plan::Ration { lower, numer, denom } => {
                if frames == 0 {
                    return 0;
                }
                // Frame 0 always takes the extra copy; afterwards one is
                // added each time (i * numer) wraps past a multiple of denom.
                let extras = 1 + (frames as u128 - 1) * numer as u128 / denom as u128;
                frames * lower + extras as u64
            }
        }
    }
}

/// Iterator over per-frame repeat counts.
///
/// Tracks `(i * numer) mod denom` incrementally so no product can
/// overflow however long the stream is.
#[derive(Debug, Clone)]
pub struct Repeats {
    plan: Plan,
    phase: u64,
}

impl Iterator for Repeats {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        Some(match self.plan {
            Plan::Identity => 1,
            Plan::Repeat(k) => k,
            Plan::Ration { lower, numer, denom } => {
                let count = if self.phase < numer { lower + 1 } else { lower };
                self.phase = (self.phase + numer) % denom;
                count
            }
        })
    }
}

/// Streams the frames of `src` into `dst` according to `plan`.
///
/// `byte_count` bytes of `src` are read as frames of `frame_bytes` bytes.
/// Returns the number of bytes written to `dst`.
pub fn multiply_frames<S, W>(
    src: &mut S,
    byte_count: u64,
    frame_bytes: usize,
    plan: Plan,
    dst: &mut W,
    burst: usize,
) -> Result<u64>
where
    S: Read + Seek + ?Sized,
    W: Write + ?Sized,
{
    let frames = byte_count / frame_bytes as u64;
    debug!(
        ?plan,
        frames,
        output_frames = plan.output_frames(frames),
        "wav: multiplying frames"
    );

    if plan == Plan::Identity {
        return Ok(stream::copy(src, byte_count, dst, burst)?);
    }

    let mut reader = ChunkReader::new(src, byte_count, frame_bytes, burst)?;
    let mut writer = BurstWriter::new(dst, burst);
    let mut repeats = plan.repeats();
    while let Some(frame) = reader.next_chunk()? {
        let count = repeats.next().unwrap_or(0);
        writer.write_repeated(frame, count)?;
    }
    Ok(writer.finish()?)
}
