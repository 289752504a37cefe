//! Scalar numeric formats and fixed-point conversion.
//!
//! Vector components in a playprint are written either as raw IEEE floats or
//! as one of two fixed-point integer encodings, selected once per compile.
//! Conversion truncates toward zero; the runtime consumes the same lossy value.

use std::fmt;
use std::str::FromStr;

use super::{Error, Result};

/// Scale factor for 16.16 fixed point.
pub const FIXED16_16_ONE: f64 = 65536.0;

/// Scale factor for 20.12 fixed point.
pub const FIXED20_12_ONE: f64 = 4096.0;

/// Numeric encoding applied to format-aware components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScalarFormat {
    /// Raw IEEE 754 single precision
    #[default]
    Floating,
    /// Signed 16.16 fixed point
    Fixed16_16,
    /// Signed 20.12 fixed point
    Fixed20_12,
}

impl ScalarFormat {
    /// All formats, in declaration order.
    pub const ALL: [ScalarFormat; 3] = [Self::Floating, Self::Fixed16_16, Self::Fixed20_12];

    /// Returns the name of this format as a string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Floating => "floating",
            Self::Fixed16_16 => "fixed16.16",
            Self::Fixed20_12 => "fixed20.12",
        }
    }

    /// True for the two fixed-point encodings.
    #[inline]
    pub const fn is_fixed(self) -> bool {
        !matches!(self, Self::Floating)
    }

    /// Largest absolute error introduced by encoding a value in this format.
    pub fn precision(self) -> f32 {
        match self {
            Self::Floating => 0.0,
            Self::Fixed16_16 => (1.0 / FIXED16_16_ONE) as f32,
            Self::Fixed20_12 => (1.0 / FIXED20_12_ONE) as f32,
        }
    }
}

impl fmt::Display for ScalarFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ScalarFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "floating" | "float" => Ok(Self::Floating),
            "fixed16.16" | "fixed16" | "16.16" => Ok(Self::Fixed16_16),
            "fixed20.12" | "fixed20" | "20.12" => Ok(Self::Fixed20_12),
            other => Err(Error::other(format!("unknown scalar format '{other}'"))),
        }
    }
}

/// Truncate `f * scale` toward zero and wrap into 32 bits.
///
/// The product is computed in f64 so every finite f32 input is exact before
/// truncation. Narrowing i64 -> i32 is two's-complement wraparound; products
/// beyond the i64 range saturate first. NaN encodes as 0.
#[inline]
fn to_fixed(f: f32, scale: f64) -> i32 {
    (f64::from(f) * scale).trunc() as i64 as i32
}

/// Encode as signed 16.16 fixed point.
#[inline]
pub fn to_fixed16_16(f: f32) -> i32 {
    to_fixed(f, FIXED16_16_ONE)
}

/// Encode as signed 20.12 fixed point.
#[inline]
pub fn to_fixed20_12(f: f32) -> i32 {
    to_fixed(f, FIXED20_12_ONE)
}

/// Decode a signed 16.16 fixed point value.
#[inline]
pub fn from_fixed16_16(i: i32) -> f32 {
    (f64::from(i) / FIXED16_16_ONE) as f32
}

/// Decode a signed 20.12 fixed point value.
#[inline]
pub fn from_fixed20_12(i: i32) -> f32 {
    (f64::from(i) / FIXED20_12_ONE) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_unit_values() {
        assert_eq!(to_fixed16_16(1.0), 65536);
        assert_eq!(to_fixed20_12(1.0), 4096);
        assert_eq!(to_fixed16_16(-0.5), -32768);
        assert_eq!(to_fixed20_12(-2.25), -9216);
    }

    #[test]
    fn test_fixed_truncates_toward_zero() {
        // 1.5 / 65536 units -> 1 after truncation, -1 for the negative side
        let tiny = (1.5 / FIXED16_16_ONE) as f32;
        assert_eq!(to_fixed16_16(tiny), 1);
        assert_eq!(to_fixed16_16(-tiny), -1);
        assert_eq!(to_fixed20_12(0.0001), 0);
    }

    #[test]
    fn test_fixed_wraps_out_of_range() {
        // 32768.0 * 65536 == 2^31, one past i32::MAX
        assert_eq!(to_fixed16_16(32768.0), i32::MIN);
        assert_eq!(to_fixed16_16(65536.0), 0);
        assert_eq!(to_fixed16_16(f32::NAN), 0);
    }

    #[test]
    fn test_fixed_inverse_within_precision() {
        for v in [0.0f32, 1.0, -1.0, 3.14159, -123.456, 0.00012] {
            let a = from_fixed16_16(to_fixed16_16(v));
            let b = from_fixed20_12(to_fixed20_12(v));
            assert!((a - v).abs() <= ScalarFormat::Fixed16_16.precision(), "{v} -> {a}");
            assert!((b - v).abs() <= ScalarFormat::Fixed20_12.precision(), "{v} -> {b}");
        }
    }

    #[test]
    fn test_format_names() {
        for format in ScalarFormat::ALL {
            assert_eq!(format.name().parse::<ScalarFormat>().unwrap(), format);
        }
        assert!("fixed8.8".parse::<ScalarFormat>().is_err());
        assert!(!ScalarFormat::Floating.is_fixed());
        assert!(ScalarFormat::Fixed20_12.is_fixed());
    }
}
