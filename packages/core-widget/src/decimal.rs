//! Exact base-10 numbers.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::Error;

/// Maximum number of significant digits a `Decimal` holds.
pub const MAX_DIGITS: usize = 38;

/// Maximum number of fractional digits.
pub const MAX_SCALE: u32 = 64;

/// An exact decimal number: `coefficient * 10^-scale`.
///
/// Parsing keeps every significant digit of the input, so `"11.111"` stays
/// `11.111` instead of the nearest binary float. Equality is numeric:
/// `0`, `0.0` and `0.00` are all equal, while `Display` keeps the scale the
/// value was written with.
#[derive(Clone, Copy, Debug, Default)]
pub struct Decimal {
    coefficient: i128,
    scale: u32,
}

impl Decimal {
    /// Zero with no fractional digits.
    pub const ZERO: Decimal = Decimal {
        coefficient: 0,
        scale: 0,
    };

    /// Create a decimal from its raw parts.
    pub const fn new(coefficient: i128, scale: u32) -> Self {
        Decimal { coefficient, scale }
    }

    /// The unscaled integer coefficient.
    pub fn coefficient(&self) -> i128 {
        self.coefficient
    }

    /// Number of digits after the decimal point.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Check if the value is zero.
    pub fn is_zero(&self) -> bool {
        self.coefficient == 0
    }

    /// Drop trailing fractional zeros: `1.500` becomes `1.5`, `0.0` becomes `0`.
    pub fn normalize(&self) -> Decimal {
        let mut coefficient = self.coefficient;
        let mut scale = self.scale;
        while scale > 0 && coefficient % 10 == 0 {
            coefficient /= 10;
            scale -= 1;
        }
        Decimal { coefficient, scale }
    }

    /// Integer part, truncated toward zero.
    pub fn trunc(&self) -> i128 {
        match 10i128.checked_pow(self.scale) {
            Some(divisor) => self.coefficient / divisor,
            // 10^scale exceeds every representable coefficient.
            None => 0,
        }
    }

    /// Nearest `f64`. Lossy.
    pub fn to_f64(&self) -> f64 {
        // Display never produces anything f64 parsing rejects.
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Convert a float through its shortest round-trip text.
    pub fn from_f64(value: f64) -> Result<Decimal, Error> {
        if !value.is_finite() {
            return Err(Error::parse("decimal", value.to_string()));
        }
        value.to_string().parse()
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Self {
        Decimal::new(v as i128, 0)
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || Error::parse("decimal", s);

        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(pos) => {
                let exp: i64 = unsigned[pos + 1..].parse().map_err(|_| invalid())?;
                (&unsigned[..pos], exp)
            }
            None => (unsigned, 0),
        };

        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((i, f)) => (i, f),
            None => (mantissa, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let digits: String = format!("{}{}", int_part, frac_part);
        let significant = digits.trim_start_matches('0');
        if significant.len() > MAX_DIGITS {
            return Err(Error::parse(
                format!("decimal of at most {} digits", MAX_DIGITS),
                s,
            ));
        }

        let mut coefficient: i128 = if significant.is_empty() {
            0
        } else {
            significant.parse().map_err(|_| invalid())?
        };
        if negative {
            coefficient = -coefficient;
        }

        if coefficient == 0 {
            // Zero keeps its written scale, within bounds, whatever the exponent.
            let scale = (frac_part.len() as i64)
                .saturating_sub(exponent)
                .clamp(0, MAX_SCALE as i64);
            return Ok(Decimal::new(0, scale as u32));
        }

        let mut scale = (frac_part.len() as i64)
            .checked_sub(exponent)
            .ok_or_else(invalid)?;
        if scale < 0 {
            // Scaling up by more than MAX_DIGITS always overflows i128.
            if scale < -(MAX_DIGITS as i64) {
                return Err(invalid());
            }
            while scale < 0 {
                coefficient = coefficient.checked_mul(10).ok_or_else(invalid)?;
                scale += 1;
            }
        }
        if scale > MAX_SCALE as i64 {
            return Err(Error::parse(
                format!("decimal of at most {} fractional digits", MAX_SCALE),
                s,
            ));
        }

        Ok(Decimal::new(coefficient, scale as u32))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.coefficient.unsigned_abs().to_string();
        let scale = self.scale as usize;
        if self.coefficient < 0 {
            f.write_str("-")?;
        }
        if scale == 0 {
            return f.write_str(&digits);
        }
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{}.{}", int_part, frac_part)
        } else {
            write!(f, "0.{}{}", "0".repeat(scale - digits.len()), digits)
        }
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let a = self.normalize();
        let b = other.normalize();
        a.coefficient == b.coefficient && a.scale == b.scale
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let n = self.normalize();
        n.coefficient.hash(state);
        n.scale.hash(state);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Display output parses back to an equal decimal with the same scale.
        #[test]
        fn prop_display_parses_back(coefficient in any::<i64>(), scale in 0u32..20) {
            let d = Decimal::new(coefficient as i128, scale);
            let text = d.to_string();
            let parsed: Decimal = text.parse().unwrap();
            prop_assert_eq!(parsed, d);
            prop_assert_eq!(parsed.scale(), scale);
        }
    }
}
