//! Exact non-negative rationals for frame multipliers.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Result, WavError};
use crate::options::MAX_PRECISION;

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// A reduced fraction `numer / denom` with `denom >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    numer: u64,
    denom: u64,
}

impl Ratio {
    pub const ONE: Ratio = Ratio { numer: 1, denom: 1 };

    /// Creates a reduced ratio.
    pub fn new(numer: u64, denom: u64) -> Result<Self> {
        if denom == 0 {
            return Err(WavError::validation("ratio denominator must not be zero"));
        }
        let g = gcd(numer, denom).max(1);
        Ok(Self {
            numer: numer / g,
            denom: denom / g,
        })
    }

    /// Converts a float by rounding it to `precision` decimal places.
    ///
    /// The denominator is at most `10^precision`; precision is capped at
    /// [`MAX_PRECISION`].
    pub fn from_f64(value: f64, precision: u32) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(WavError::validation(format!(
                "multiplier must be a finite non-negative number, got {value}"
            )));
        }
        let scale = 10u64.pow(precision.min(MAX_PRECISION));
        let scaled = (value * scale as f64).round();
        if scaled >= u64::MAX as f64 {
            return Err(WavError::validation(format!("multiplier {value} is too large")));
        }
        Self::new(scaled as u64, scale)
    }

    pub fn numer(&self) -> u64 {
        self.numer
    }

    pub fn denom(&self) -> u64 {
        self.denom
    }

    pub fn is_integer(&self) -> bool {
        self.denom == 1
    }

    /// Integer part.
    pub fn floor(&self) -> u64 {
        self.numer / self.denom
    }

    /// Fractional part, in `[0, 1)`.
    pub fn fract(&self) -> Ratio {
        Ratio {
            numer: self.numer % self.denom,
            denom: self.denom,
        }
        .reduced()
    }

    pub fn to_f64(&self) -> f64 {
        self.numer as f64 / self.denom as f64
    }

    fn reduced(self) -> Self {
        let g = gcd(self.numer, self.denom).max(1);
        Self {
            numer: self.numer / g,
            denom: self.denom / g,
        }
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numer as u128 * other.denom as u128;
        let rhs = other.numer as u128 * self.denom as u128;
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numer, self.denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_reduces() {
        let r = Ratio::new(48000, 44100).unwrap();
        assert_eq!((r.numer(), r.denom()), (160, 147));
        assert_eq!(Ratio::new(0, 5).unwrap(), Ratio::new(0, 1).unwrap());
        assert!(Ratio::new(1, 0).is_err());
    }

    #[test]
    fn test_from_f64() {
        let r = Ratio::from_f64(2.5, 10).unwrap();
        assert_eq!((r.numer(), r.denom()), (5, 2));

        let r = Ratio::from_f64(0.75, 8).unwrap();
        assert_eq!((r.numer(), r.denom()), (3, 4));

        let r = Ratio::from_f64(3.0, 10).unwrap();
        assert!(r.is_integer());
        assert_eq!(r.floor(), 3);
    }

    #[test]
    fn test_from_f64_rounds_to_precision() {
        // 1/3 rounded to 4 places is 3333/10000.
        let r = Ratio::from_f64(1.0 / 3.0, 4).unwrap();
        assert_eq!((r.numer(), r.denom()), (3333, 10000));

        // Float noise below the precision collapses to an integer.
        let r = Ratio::from_f64(2.000_000_000_01, 8).unwrap();
        assert!(r.is_integer());
        assert_eq!(r.floor(), 2);

        let r = Ratio::from_f64(1.999_999_999_99, 8).unwrap();
        assert_eq!(r, Ratio::new(2, 1).unwrap());
    }

    #[test]
    fn test_from_f64_denominator_bounded() {
        let r = Ratio::from_f64(std::f64::consts::PI, 30).unwrap();
        assert!(r.denom() <= 10u64.pow(MAX_PRECISION));
    }

    #[test]
    fn test_from_f64_rejects_invalid() {
        assert!(Ratio::from_f64(f64::NAN, 10).is_err());
        assert!(Ratio::from_f64(f64::INFINITY, 10).is_err());
        assert!(Ratio::from_f64(-0.5, 10).is_err());
        assert!(Ratio::from_f64(1e20, 10).is_err());
    }

    #[test]
    fn test_floor_and_fract() {
        let r = Ratio::new(7, 3).unwrap();
        assert_eq!(r.floor(), 2);
        assert_eq!(r.fract(), Ratio::new(1, 3).unwrap());

        let r = Ratio::new(6, 4).unwrap();
        assert_eq!(r.fract(), Ratio::new(1, 2).unwrap());
    }

    #[test]
    fn test_ordering() {
        let a = Ratio::new(1, 100).unwrap();
        let b = Ratio::from_f64(0.005, 10).unwrap();
        assert!(b < a);
        assert!(Ratio::new(201, 2).unwrap() > Ratio::new(100, 1).unwrap());
        assert_eq!(Ratio::new(2, 4).unwrap().cmp(&Ratio::new(1, 2).unwrap()), Ordering::Equal);
    }

    #[test]
    fn test_display() {
        assert_eq!(Ratio::new(160, 147).unwrap().to_string(), "160/147");
        assert_eq!(Ratio::ONE.to_string(), "1/1");
    }
}
