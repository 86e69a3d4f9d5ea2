//! Arithmetic on tagged numbers
//!
//! Integer-only operations stay exact in `i64`; anything mixed, inexact or
//! overflowing is promoted to a decimal. Multiplication goes through the
//! decimal-safe path so that `9.1 * 6` shows `54.6`.

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult, Number};

/// Binary operation applied to the accumulator and the next operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// All operations in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }
}

/// Stateless arithmetic over [`Number`]
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl Calculator {
    /// Performs an operation on two operands
    pub fn calculate(a: Number, b: Number, op: Operation) -> CalcResult<Number> {
        match op {
            Operation::Add => Self::add(a, b),
            Operation::Subtract => Self::subtract(a, b),
            Operation::Multiply => Self::multiply(a, b),
            Operation::Divide => Self::divide(a, b),
        }
    }

    /// Addition: a + b
    pub fn add(a: Number, b: Number) -> CalcResult<Number> {
        let result = match (a, b) {
            (Number::Integer(x), Number::Integer(y)) => x
                .checked_add(y)
                .map_or_else(|| Number::Decimal(x as f64 + y as f64), Number::Integer),
            _ => Number::Decimal(a.as_f64() + b.as_f64()),
        };
        Self::check_overflow(result)
    }

    /// Subtraction: a - b
    pub fn subtract(a: Number, b: Number) -> CalcResult<Number> {
        let result = match (a, b) {
            (Number::Integer(x), Number::Integer(y)) => x
                .checked_sub(y)
                .map_or_else(|| Number::Decimal(x as f64 - y as f64), Number::Integer),
            _ => Number::Decimal(a.as_f64() - b.as_f64()),
        };
        Self::check_overflow(result)
    }

    /// Multiplication: a * b
    pub fn multiply(a: Number, b: Number) -> CalcResult<Number> {
        let result = match (a, b) {
            (Number::Integer(x), Number::Integer(y)) => x
                .checked_mul(y)
                .map_or_else(|| Number::Decimal(x as f64 * y as f64), Number::Integer),
            _ => Number::Decimal(Self::decimal_safe_multiply(a, b)),
        };
        Self::check_overflow(result)
    }

    /// Division: a / b
    ///
    /// Two integers stay an integer only when the division is exact.
    pub fn divide(a: Number, b: Number) -> CalcResult<Number> {
        if b.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        let result = match (a, b) {
            (Number::Integer(x), Number::Integer(y)) => match x.checked_rem(y) {
                Some(0) => x
                    .checked_div(y)
                    .map_or_else(|| Number::Decimal(x as f64 / y as f64), Number::Integer),
                _ => Number::Decimal(x as f64 / y as f64),
            },
            _ => Number::Decimal(a.as_f64() / b.as_f64()),
        };
        Self::check_overflow(result)
    }

    /// Multiplies through integer significands and scales down once.
    ///
    /// With `d1`, `d2` fractional digits and significands `i1`, `i2`, the
    /// product is `(i1 * i2) / 10^(d1 + d2)`. The numerator is exact and the
    /// scaling is a single correctly rounded decimal-to-binary conversion,
    /// so decimal literals multiply the way they would on paper.
    #[must_use]
    pub fn decimal_safe_multiply(a: Number, b: Number) -> f64 {
        let naive = a.as_f64() * b.as_f64();
        let (Some((i1, d1)), Some((i2, d2))) = (a.scaled(), b.scaled()) else {
            return naive;
        };
        match i1.checked_mul(i2) {
            Some(product) => format!("{product}e-{}", d1 + d2)
                .parse::<f64>()
                .unwrap_or(naive),
            None => naive,
        }
    }

    /// Checks for overflow (infinity or NaN)
    fn check_overflow(result: Number) -> CalcResult<Number> {
        match result {
            Number::Decimal(x) if !x.is_finite() => Err(CalcError::Overflow),
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn int(n: i64) -> Number {
        Number::Integer(n)
    }

    fn dec(x: f64) -> Number {
        Number::Decimal(x)
    }

    // --- Operation enum tests ---

    #[test]
    fn test_operation_symbols() {
        assert_eq!(Operation::Add.symbol(), '+');
        assert_eq!(Operation::Subtract.symbol(), '-');
        assert_eq!(Operation::Multiply.symbol(), '*');
        assert_eq!(Operation::Divide.symbol(), '/');
    }

    // --- Addition / subtraction ---

    #[test]
    fn test_add_integers_stays_integer() {
        assert_eq!(Calculator::add(int(2), int(3)), Ok(int(5)));
    }

    #[test]
    fn test_add_mixed_promotes() {
        assert_eq!(Calculator::add(int(2), dec(0.5)), Ok(dec(2.5)));
        assert_eq!(Calculator::add(dec(0.5), int(2)), Ok(dec(2.5)));
    }

    #[test]
    fn test_add_integer_overflow_promotes() {
        let result = Calculator::add(int(i64::MAX), int(1)).unwrap();
        assert!(!result.is_integer());
        assert!(result.as_f64() > 9.2e18);
    }

    #[test]
    fn test_subtract_integers() {
        assert_eq!(Calculator::subtract(int(3), int(5)), Ok(int(-2)));
    }

    #[test]
    fn test_subtract_mixed_promotes() {
        assert_eq!(Calculator::subtract(dec(5.5), int(3)), Ok(dec(2.5)));
    }

    #[test]
    fn test_subtract_integer_overflow_promotes() {
        let result = Calculator::subtract(int(i64::MIN), int(1)).unwrap();
        assert!(!result.is_integer());
    }

    // --- Multiplication ---

    #[test]
    fn test_multiply_integers_stays_integer() {
        assert_eq!(Calculator::multiply(int(3), int(4)), Ok(int(12)));
    }

    #[test]
    fn test_multiply_avoids_float_artifacts() {
        let result = Calculator::multiply(dec(9.1), int(6)).unwrap();
        assert_eq!(result, dec(54.6));
        assert_eq!(result.to_string(), "54.6");
    }

    #[test]
    fn test_multiply_two_decimals() {
        assert_eq!(Calculator::multiply(dec(0.1), dec(0.2)), Ok(dec(0.02)));
        assert_eq!(Calculator::multiply(dec(1.1), dec(1.1)), Ok(dec(1.21)));
    }

    #[test]
    fn test_multiply_two_decimal_places() {
        assert_eq!(Calculator::multiply(dec(1.25), dec(0.08)), Ok(dec(0.1)));
        assert_eq!(Calculator::multiply(dec(0.07), dec(0.07)), Ok(dec(0.0049)));
        assert_eq!(Calculator::multiply(dec(19.99), dec(3.33)), Ok(dec(66.5667)));
    }

    #[test]
    fn test_multiply_deep_fractional_scale() {
        let result = Calculator::multiply(dec(0.0000000000000000000000007), int(7)).unwrap();
        assert_eq!(result, dec(0.0000000000000000000000049));
        assert_eq!(result.to_string(), "0.0000000000000000000000049");

        assert_eq!(
            Calculator::multiply(dec(0.000000000000000000000003), dec(0.3)),
            Ok(dec(0.0000000000000000000000009))
        );
        assert_eq!(
            Calculator::multiply(dec(0.00000000000000000001), dec(0.001)),
            Ok(dec(0.00000000000000000000001))
        );
    }

    #[test]
    fn test_multiply_integral_decimal_stays_decimal() {
        assert_eq!(Calculator::multiply(dec(2.5), int(2)), Ok(dec(5.0)));
    }

    #[test]
    fn test_multiply_negative_decimal() {
        assert_eq!(Calculator::multiply(dec(-0.3), int(3)), Ok(dec(-0.9)));
    }

    #[test]
    fn test_multiply_integer_overflow_promotes() {
        let result = Calculator::multiply(int(i64::MAX), int(2)).unwrap();
        assert!(!result.is_integer());
    }

    #[test]
    fn test_multiply_overflow() {
        assert_eq!(
            Calculator::multiply(dec(1e300), dec(1e300)),
            Err(CalcError::Overflow)
        );
    }

    #[test]
    fn test_decimal_safe_multiply_matches_naive_for_wide_values() {
        let a = dec(1e300);
        let b = dec(0.5);
        assert_eq!(Calculator::decimal_safe_multiply(a, b), 5e299);
    }

    // --- Division ---

    #[test]
    fn test_divide_exact_integers_stays_integer() {
        assert_eq!(Calculator::divide(int(6), int(2)), Ok(int(3)));
    }

    #[test]
    fn test_divide_inexact_integers_promotes() {
        assert_eq!(Calculator::divide(int(7), int(2)), Ok(dec(3.5)));
    }

    #[test]
    fn test_divide_by_integer_zero() {
        assert_eq!(
            Calculator::divide(int(5), int(0)),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_divide_by_decimal_zero() {
        assert_eq!(
            Calculator::divide(dec(5.5), dec(0.0)),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_divide_min_by_minus_one_promotes() {
        let result = Calculator::divide(int(i64::MIN), int(-1)).unwrap();
        assert!(!result.is_integer());
    }

    #[test]
    fn test_calculate_dispatch() {
        assert_eq!(
            Calculator::calculate(int(2), int(3), Operation::Add),
            Ok(int(5))
        );
        assert_eq!(
            Calculator::calculate(int(2), int(3), Operation::Subtract),
            Ok(int(-1))
        );
        assert_eq!(
            Calculator::calculate(int(2), int(3), Operation::Multiply),
            Ok(int(6))
        );
        assert_eq!(
            Calculator::calculate(int(3), int(2), Operation::Divide),
            Ok(dec(1.5))
        );
    }

    // --- Property-based tests ---

    proptest! {
        #[test]
        fn prop_integer_add_is_exact(a in -1_000_000_000i64..1_000_000_000, b in -1_000_000_000i64..1_000_000_000) {
            prop_assert_eq!(Calculator::add(int(a), int(b)), Ok(int(a + b)));
        }

        #[test]
        fn prop_integer_multiply_is_exact(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
            prop_assert_eq!(Calculator::multiply(int(a), int(b)), Ok(int(a * b)));
        }

        #[test]
        fn prop_one_digit_decimal_times_integer(whole in 0i64..10_000, tenth in 0i64..10, k in 1i64..1_000) {
            let text = format!("{whole}.{tenth}");
            let a = Number::parse(&text).unwrap();
            let product = Calculator::multiply(a, int(k)).unwrap();
            // Exact product has at most one fractional digit
            let expected = Number::parse(&format!("{}.{}", (whole * 10 + tenth) * k / 10, (whole * 10 + tenth) * k % 10)).unwrap();
            prop_assert_eq!(product, expected);
        }

        #[test]
        fn prop_deep_decimals_multiply_like_paper(
            a in 1i64..100_000,
            b in 1i64..100_000,
            zeros in 0usize..30,
        ) {
            let pad = "0".repeat(zeros);
            let (ta, tb) = (format!("{pad}{a}"), format!("{pad}{b}"));
            let x = Number::parse(&format!("0.{ta}")).unwrap();
            let y = Number::parse(&format!("0.{tb}")).unwrap();
            // Exact product written out, rounded to binary once
            let expected: f64 = format!("{}e-{}", a * b, ta.len() + tb.len()).parse().unwrap();
            prop_assert_eq!(Calculator::multiply(x, y), Ok(dec(expected)));
        }

        #[test]
        fn prop_multiply_commutative(a in -1e5f64..1e5f64, b in -1e5f64..1e5f64) {
            let r1 = Calculator::multiply(dec(a), dec(b));
            let r2 = Calculator::multiply(dec(b), dec(a));
            prop_assert_eq!(r1, r2);
        }

        #[test]
        fn prop_divide_by_self(a in 1i64..1_000_000) {
            prop_assert_eq!(Calculator::divide(int(a), int(a)), Ok(int(1)));
        }
    }
}
