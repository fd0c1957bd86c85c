//! Decimal arithmetic behind every completed computation
//!
//! Operands travel through the engine as strings exactly as they were typed
//! or produced; they are parsed into arbitrary-precision [`BigDecimal`]s only
//! at the compute boundary. Sums, differences and products are exact;
//! quotients carry 100 significant digits before the final rounding.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Significant digits kept in a stored result
pub const RESULT_PRECISION: u64 = 15;

const PRECISION: NonZeroU64 = match NonZeroU64::new(RESULT_PRECISION) {
    Some(precision) => precision,
    None => NonZeroU64::MIN,
};

/// Largest decimal exponent a stored value may have, in either direction
///
/// Stored values are rendered in plain notation, so this also bounds the
/// length of every operand string.
pub const MAX_EXPONENT: i64 = 1000;

/// The four operators on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (−)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operator {
    /// Returns the keypad symbol, which is also the history notation
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Parses a keypad label
    ///
    /// Only the four keypad symbols are operators; keyboard spellings such as
    /// `*` are translated by the keymap before they get here.
    pub fn from_label(label: &str) -> CalcResult<Self> {
        match label {
            "+" => Ok(Self::Add),
            "−" => Ok(Self::Subtract),
            "×" => Ok(Self::Multiply),
            "÷" => Ok(Self::Divide),
            other => Err(CalcError::UnsupportedOperator(other.to_string())),
        }
    }

    /// Applies the operator
    pub fn apply(self, lhs: &BigDecimal, rhs: &BigDecimal) -> CalcResult<BigDecimal> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide => {
                if rhs.is_zero() {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(lhs / rhs)
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

/// Parses a stored operand into a decimal
///
/// Accepts the mid-entry shapes the keypad can produce: a trailing point
/// (`"5."`) and a missing integer part (`".5"`, `"-.5"`). Exponent notation
/// is rejected.
pub fn parse_operand(operand: &str) -> CalcResult<BigDecimal> {
    let invalid = || CalcError::InvalidOperand(operand.to_string());

    let trimmed = operand.strip_suffix('.').unwrap_or(operand);
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    if unsigned.is_empty() || unsigned.starts_with('-') {
        return Err(invalid());
    }
    if !unsigned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(invalid());
    }

    let body = if unsigned.starts_with('.') {
        format!("0{unsigned}")
    } else {
        unsigned.to_string()
    };
    let value = BigDecimal::from_str(&body).map_err(|_| invalid())?;
    Ok(if negative { -value } else { value })
}

/// Runs one `previous op current` computation
///
/// The result is rounded to [`RESULT_PRECISION`] significant digits, half
/// away from zero, and stripped of trailing fractional zeros. That string is
/// what the engine stores, chains on, and writes into history.
pub fn compute(previous: &str, operator: Operator, current: &str) -> CalcResult<String> {
    let lhs = parse_operand(previous)?;
    let rhs = parse_operand(current)?;
    let raw = operator.apply(&lhs, &rhs)?;
    canonical(&raw.with_precision_round(PRECISION, RoundingMode::HalfUp))
}

/// Divides an operand by one hundred, exactly
pub fn percent(operand: &str) -> CalcResult<String> {
    let value = parse_operand(operand)?;
    canonical(&(value / BigDecimal::from(100)))
}

/// Plain-notation string for a value within [`MAX_EXPONENT`]
fn canonical(value: &BigDecimal) -> CalcResult<String> {
    if value.is_zero() {
        return Ok("0".to_string());
    }
    let normalized = value.normalized();
    if exponent(&normalized).abs() > MAX_EXPONENT {
        return Err(CalcError::Overflow);
    }
    Ok(normalized.to_plain_string())
}

/// Power of ten of the leading digit: 1 for `12.5`, -3 for `0.004`
fn exponent(value: &BigDecimal) -> i64 {
    let (mantissa, scale) = value.as_bigint_and_exponent();
    let digits = mantissa.magnitude().to_string().len() as i64;
    digits - 1 - scale
}
