//! bfloat16 conversion.
//!
//! A bfloat16 value is the upper half of an IEEE-754 binary32 value: same
//! sign and exponent, seven explicit mantissa bits. Values are carried as raw
//! `u16` bit patterns.

/// Rounds an `f32` to the nearest bfloat16, ties to even.
///
/// NaN inputs stay NaN (the quiet bit is forced so truncation cannot turn
/// them into infinities).
pub fn from_f32(value: f32) -> u16 {
    let bits = value.to_bits();
    if value.is_nan() {
        return ((bits >> 16) as u16) | 0x0040;
    }
    let lsb = (bits >> 16) & 1;
    ((bits + 0x7FFF + lsb) >> 16) as u16
}

/// Widens a bfloat16 bit pattern to `f32`. Exact.
pub fn to_f32(bits: u16) -> f32 {
    f32::from_bits(u32::from(bits) << 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_integers_are_exact() {
        assert_eq!(from_f32(1.0), 0x3F80);
        assert_eq!(from_f32(3.0), 0x4040);
        assert_eq!(from_f32(-2.0), 0xC000);
        for i in -256..=256 {
            let x = i as f32;
            assert_eq!(to_f32(from_f32(x)), x);
        }
    }

    #[test]
    fn signed_zero() {
        assert_eq!(from_f32(0.0), 0x0000);
        assert_eq!(from_f32(-0.0), 0x8000);
    }

    #[test]
    fn ties_round_to_even() {
        // 257 sits halfway between 256 and 258; 256 has the even mantissa.
        assert_eq!(to_f32(from_f32(257.0)), 256.0);
        // 259 sits halfway between 258 and 260; 260 has the even mantissa.
        assert_eq!(to_f32(from_f32(259.0)), 260.0);
    }

    #[test]
    fn rounds_to_nearest() {
        assert_eq!(to_f32(from_f32(1.0 + 1.0 / 512.0)), 1.0);
        assert_eq!(to_f32(from_f32(1.0 + 3.0 / 256.0)), 1.0 + 2.0 / 128.0);
    }

    #[test]
    fn overflow_to_infinity() {
        assert_eq!(to_f32(from_f32(f32::MAX)), f32::INFINITY);
        assert_eq!(from_f32(f32::NEG_INFINITY), 0xFF80);
    }

    #[test]
    fn nan_stays_nan() {
        assert!(to_f32(from_f32(f32::NAN)).is_nan());
        let payload_in_low_bits = f32::from_bits(0x7F80_0001);
        assert!(to_f32(from_f32(payload_in_low_bits)).is_nan());
    }
}
