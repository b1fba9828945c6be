//! Fixed-point decimal for currency amounts.
//!
//! Avoids floating-point drift in the tier arithmetic by storing values as
//! integers with 4 decimal places of precision (i.e., value × 10,000).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Ten-thousandths per whole unit.
pub const SCALE: i64 = 10_000;

/// Digits kept after the decimal point.
const FRACTION_DIGITS: i64 = 4;

/// Fixed-point decimal with 4 decimal places.
///
/// Stores value * 10000 internally (e.g., 1.5 is stored as 15000).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(pub i64);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let whole = abs / SCALE as u64;
        let frac = abs % SCALE as u64;

        if self.0 < 0 {
            write!(f, "-")?;
        }

        if frac == 0 {
            write!(f, "{}", whole)
        } else {
            // Remove trailing zeros from fraction
            let frac_str = format!("{:04}", frac);
            write!(f, "{}.{}", whole, frac_str.trim_end_matches('0'))
        }
    }
}

/// Error returned when a string is not a representable decimal amount.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDecimalError {
    #[error("'{0}' is not a valid decimal amount")]
    Invalid(String),

    #[error("'{0}' is out of range for an amount")]
    OutOfRange(String),
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Parses `[+-]digits[.digits][e[+-]digits]` exactly.
    ///
    /// Digits past the fourth decimal place are rounded half away from zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ParseDecimalError::Invalid(trimmed.to_string());
        let out_of_range = || ParseDecimalError::OutOfRange(trimmed.to_string());

        let (negative, body) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(pos) => {
                let exponent = body[pos + 1..].parse::<i32>().map_err(|_| invalid())?;
                (&body[..pos], i64::from(exponent))
            }
            None => (body, 0),
        };

        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        // Index into the digit sequence where the kept digits end.
        let cutoff = whole.len() as i64 + exponent + FRACTION_DIGITS;
        let digits = whole.bytes().chain(fraction.bytes());
        let digit_count = (whole.len() + fraction.len()) as i64;

        let mut value: i64 = 0;
        let mut round_up = false;
        for (index, digit) in digits.enumerate() {
            let index = index as i64;
            let digit = i64::from(digit - b'0');
            if index < cutoff {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit))
                    .ok_or_else(out_of_range)?;
            } else {
                if index == cutoff {
                    round_up = digit >= 5;
                }
                break;
            }
        }

        // Trailing zeros implied by a positive exponent.
        if value != 0 {
            for _ in 0..(cutoff - digit_count).max(0) {
                value = value.checked_mul(10).ok_or_else(out_of_range)?;
            }
        }

        if round_up {
            value = value.checked_add(1).ok_or_else(out_of_range)?;
        }

        Ok(Decimal(if negative { -value } else { value }))
    }
}

impl Decimal {
    pub const ZERO: Decimal = Decimal(0);

    /// Create from raw internal representation (value in ten-thousandths).
    ///
    /// E.g., `Decimal::new(15000)` represents 1.5
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Create from a whole number of units.
    pub const fn from_whole(units: i64) -> Self {
        Self(units * SCALE)
    }

    /// Create from a float.
    /// E.g., from_f64(1.5) => Decimal(15000)
    ///
    /// Values outside the representable range saturate.
    pub fn from_f64(value: f64) -> Self {
        Self((value * SCALE as f64).round() as i64)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}
