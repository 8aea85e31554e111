//! Sample codec: reinterprets fixed-width little-endian PCM samples.
//!
//! WAV stores 8-bit samples unsigned (silence at 128) and every wider
//! depth as two's-complement signed integers. All arithmetic here happens
//! in the signed domain: 8-bit values are re-centred by 128 on decode and
//! shifted back on encode.

use crate::error::{Result, WavError};

/// Bit depths a WAV PCM stream may use.
pub const SUPPORTED_DEPTHS: [u16; 4] = [8, 16, 24, 32];

/// Returns an error unless `bits` is one of [`SUPPORTED_DEPTHS`].
pub fn validate_depth(bits: u16) -> Result<()> {
    if SUPPORTED_DEPTHS.contains(&bits) {
        Ok(())
    } else {
        Err(WavError::validation(format!(
            "bit depth must be one of 8, 16, 24 or 32, got {bits}"
        )))
    }
}

/// Smallest signed value representable at `bits`.
#[inline]
pub fn min_value(bits: u16) -> i64 {
    -(1i64 << (bits - 1))
}

/// Largest signed value representable at `bits`.
#[inline]
pub fn max_value(bits: u16) -> i64 {
    (1i64 << (bits - 1)) - 1
}

/// Decodes one sample into the signed domain.
///
/// `sample` must hold exactly `bits / 8` bytes.
pub fn decode(sample: &[u8], bits: u16) -> i64 {
    debug_assert_eq!(sample.len(), bits as usize / 8);
    if bits == 8 {
        return sample[0] as i64 - 128;
    }

    let mut raw: i64 = 0;
    for (i, &b) in sample.iter().enumerate() {
        raw |= (b as i64) << (8 * i);
    }
    // Sign-extend from the top bit of the sample.
    let shift = 64 - bits as u32;
    (raw << shift) >> shift
}

/// Encodes a signed-domain value as `bits / 8` little-endian bytes,
/// appending them to `out`. Values outside the depth's range are clamped.
pub fn encode(value: i64, bits: u16, out: &mut Vec<u8>) {
    let value = value.clamp(min_value(bits), max_value(bits));
    if bits == 8 {
        out.push((value + 128) as u8);
        return;
    }
    let bytes = value.to_le_bytes();
    out.extend_from_slice(&bytes[..bits as usize / 8]);
}

/// Converts one sample between bit depths, appending the result to `out`.
///
/// The value is scaled by `2^(to - from)`: widening multiplies, narrowing
/// divides with truncation toward zero.
pub fn convert(sample: &[u8], from: u16, to: u16, out: &mut Vec<u8>) {
    let value = decode(sample, from);
    let scaled = if to >= from {
        value << (to - from)
    } else {
        value / (1i64 << (from - to))
    };
    encode(scaled, to, out);
}

/// Multiplies one sample by `factor`, truncating toward zero, and appends
/// the result at the same depth.
pub fn scale(sample: &[u8], bits: u16, factor: f64, out: &mut Vec<u8>) {
    let value = decode(sample, bits);
    encode((value as f64 * factor) as i64, bits, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converted(sample: &[u8], from: u16, to: u16) -> Vec<u8> {
        let mut out = Vec::new();
        convert(sample, from, to, &mut out);
        out
    }

    #[test]
    fn test_validate_depth() {
        for bits in SUPPORTED_DEPTHS {
            assert!(validate_depth(bits).is_ok());
        }
        for bits in [0u16, 4, 12, 20, 64] {
            assert!(matches!(validate_depth(bits), Err(WavError::Validation(_))));
        }
    }

    #[test]
    fn test_decode_8bit_unsigned() {
        assert_eq!(decode(&[0x00], 8), -128);
        assert_eq!(decode(&[0x80], 8), 0);
        assert_eq!(decode(&[0xFF], 8), 127);
    }

    #[test]
    fn test_decode_signed() {
        assert_eq!(decode(&i16::MIN.to_le_bytes(), 16), i16::MIN as i64);
        assert_eq!(decode(&i16::MAX.to_le_bytes(), 16), i16::MAX as i64);
        assert_eq!(decode(&[0xFF, 0xFF, 0xFF], 24), -1);
        assert_eq!(decode(&[0x00, 0x00, 0x80], 24), -8_388_608);
        assert_eq!(decode(&[0xFF, 0xFF, 0x7F], 24), 8_388_607);
        assert_eq!(decode(&i32::MIN.to_le_bytes(), 32), i32::MIN as i64);
    }

    #[test]
    fn test_encode_clamps() {
        let mut out = Vec::new();
        encode(40_000, 16, &mut out);
        assert_eq!(out, i16::MAX.to_le_bytes());

        out.clear();
        encode(-500, 8, &mut out);
        assert_eq!(out, [0x00]);

        out.clear();
        encode(-1, 24, &mut out);
        assert_eq!(out, [0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_convert_8_to_16_extremes() {
        assert_eq!(converted(&[0x00], 8, 16), i16::MIN.to_le_bytes());
        assert_eq!(converted(&[0x80], 8, 16), 0i16.to_le_bytes());
        assert_eq!(converted(&[0xFF], 8, 16), 32512i16.to_le_bytes());
    }

    #[test]
    fn test_convert_16_to_8_extremes() {
        assert_eq!(converted(&i16::MIN.to_le_bytes(), 16, 8), [0x00]);
        assert_eq!(converted(&i16::MAX.to_le_bytes(), 16, 8), [0xFF]);
        assert_eq!(converted(&0i16.to_le_bytes(), 16, 8), [0x80]);
        // Truncation toward zero on narrowing.
        assert_eq!(converted(&(-255i16).to_le_bytes(), 16, 8), [0x80]);
    }

    #[test]
    fn test_convert_round_trip() {
        // Every 8-bit value survives 8 -> d -> 8.
        for raw in 0u8..=255 {
            for depth in [16u16, 24, 32] {
                let wide = converted(&[raw], 8, depth);
                assert_eq!(converted(&wide, depth, 8), [raw]);
            }
        }

        // 16-bit values survive 16 -> 24 -> 16 and 16 -> 32 -> 16.
        for value in [i16::MIN, -12345, -1, 0, 1, 12345, i16::MAX] {
            let bytes = value.to_le_bytes();
            for depth in [24u16, 32] {
                let wide = converted(&bytes, 16, depth);
                assert_eq!(converted(&wide, depth, 16), bytes);
            }
        }
    }

    #[test]
    fn test_convert_same_depth() {
        let bytes = (-4242i16).to_le_bytes();
        assert_eq!(converted(&bytes, 16, 16), bytes);
        assert_eq!(converted(&[0x17], 8, 8), [0x17]);
    }

    #[test]
    fn test_scale() {
        let mut out = Vec::new();
        scale(&1000i16.to_le_bytes(), 16, 0.5, &mut out);
        assert_eq!(out, 500i16.to_le_bytes());

        out.clear();
        scale(&(-999i16).to_le_bytes(), 16, 0.5, &mut out);
        assert_eq!(out, (-499i16).to_le_bytes());

        // 8-bit scales around the 128 midpoint.
        out.clear();
        scale(&[0xFF], 8, 0.5, &mut out);
        assert_eq!(out, [128 + 63]);

        out.clear();
        scale(&[0x80], 8, 0.1, &mut out);
        assert_eq!(out, [0x80]);
    }
}
