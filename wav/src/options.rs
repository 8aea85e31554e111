//! Options shared by every audio object and transform.

use crate::error::{Result, WavError};
use crate::store::{Backing, Store};

/// Default size of a read or write burst in bytes.
pub const DEFAULT_BURST_BYTES: usize = 100_000;

/// Default number of decimal places kept when a float multiplier is
/// turned into a ratio.
pub const DEFAULT_PRECISION: u32 = 10;

/// Upper bound on [`Options::precision`]. Keeps ratio denominators at or
/// below 10^10.
pub const MAX_PRECISION: u32 = 10;

/// Options for configuring audio storage and arithmetic.
///
/// Derived audio objects inherit the options of their source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum bytes moved per read or write burst.
    pub burst_bytes: usize,
    /// Decimal places used to round float multipliers (capped at 10).
    pub precision: u32,
    /// Where payloads are stored.
    pub backing: Backing,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            burst_bytes: DEFAULT_BURST_BYTES,
            precision: DEFAULT_PRECISION,
            backing: Backing::TempFile,
        }
    }
}

impl Options {
    /// Sets the burst size.
    pub fn with_burst_bytes(mut self, burst_bytes: usize) -> Self {
        self.burst_bytes = burst_bytes;
        self
    }

    /// Sets the rounding precision. Values above [`MAX_PRECISION`] are capped.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision.min(MAX_PRECISION);
        self
    }

    /// Sets the storage backing.
    pub fn with_backing(mut self, backing: Backing) -> Self {
        self.backing = backing;
        self
    }

    /// Shorthand for in-memory storage.
    pub fn in_memory() -> Self {
        Self::default().with_backing(Backing::Memory)
    }

    pub fn validate(&self) -> Result<()> {
        if self.burst_bytes == 0 {
            return Err(WavError::validation("burst size must be greater than 0"));
        }
        if self.precision > MAX_PRECISION {
            return Err(WavError::validation(format!(
                "precision cannot exceed {MAX_PRECISION} decimal places"
            )));
        }
        Ok(())
    }

    pub(crate) fn create_store(&self) -> Result<Box<dyn Store>> {
        Ok(self.backing.create()?)
    }
}
