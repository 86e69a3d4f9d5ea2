//! Tagged numeric value with integer/decimal promotion
//!
//! Operands typed without a decimal point stay in the integer domain until an
//! operation can no longer keep them exact; anything else is a decimal.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{CalcError, CalcResult};

/// A calculator value: either an exact integer or a binary floating decimal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Number {
    /// Whole number entered (or computed) without a decimal point
    Integer(i64),
    /// Value with a fractional part, or promoted from a mixed operation
    Decimal(f64),
}

impl Number {
    /// Parses an operand token.
    ///
    /// Tokens without `.` are read as integers; an integer literal too large
    /// for `i64` falls back to a decimal. A single leading `-` is allowed.
    pub fn parse(token: &str) -> CalcResult<Self> {
        let invalid = || CalcError::InvalidOperand(token.to_string());

        let digits = token.strip_prefix('-').unwrap_or(token);
        if !digits.bytes().any(|b| b.is_ascii_digit())
            || !digits.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        {
            return Err(invalid());
        }

        if !token.contains('.') {
            if let Ok(n) = token.parse::<i64>() {
                return Ok(Self::Integer(n));
            }
        }

        let value = token.parse::<f64>().map_err(|_| invalid())?;
        if value.is_finite() {
            Ok(Self::Decimal(value))
        } else {
            Err(CalcError::Overflow)
        }
    }

    /// Returns the value as `f64`
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(n) => n as f64,
            Self::Decimal(x) => x,
        }
    }

    /// Returns true for the integer variant
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Integer(_))
    }

    /// Returns true if the value equals zero in either domain
    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Integer(n) => n == 0,
            Self::Decimal(x) => x == 0.0,
        }
    }

    /// Splits the value into an integer significand and a count of
    /// fractional digits, so that `value == significand / 10^scale`.
    ///
    /// Decimals use their shortest round-trip expansion. Returns `None` when
    /// the significand does not fit in an `i128` or the value is not finite.
    #[must_use]
    pub fn scaled(self) -> Option<(i128, u32)> {
        match self {
            Self::Integer(n) => Some((i128::from(n), 0)),
            Self::Decimal(x) if x.is_finite() => {
                // f64 Display never switches to exponent notation
                let text = format!("{x}");
                let scale = text.split_once('.').map_or(0, |(_, frac)| frac.len());
                let significand = text.replace('.', "").parse::<i128>().ok()?;
                Some((significand, u32::try_from(scale).ok()?))
            }
            Self::Decimal(_) => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(x) if x.is_finite() && x.fract() == 0.0 => {
                // Keep the point whenever the digits alone would read back as an integer
                let text = x.to_string();
                if text.parse::<i64>().is_ok() {
                    write!(f, "{text}.0")
                } else {
                    f.write_str(&text)
                }
            }
            Self::Decimal(x) => write!(f, "{x}"),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Self::Decimal(x)
    }
}
