//! Calculator core: exact decimal arithmetic, the session reducer, history
//!
//! Everything in here is synchronous and free of I/O. Frontends submit
//! labeled button presses to [`Calculator`] and read back a [`Snapshot`].

pub mod engine;
pub mod format;
pub mod history;
mod operations;
pub mod session;

pub use engine::{ButtonKind, Calculator, Snapshot};
pub use operations::{compute, parse_operand, percent, Operator, MAX_EXPONENT, RESULT_PRECISION};

use thiserror::Error;

/// Literal shown in place of a number once a computation fails
pub const ERROR_TEXT: &str = "Error";

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// None of these ever escape [`Calculator::submit`]; the engine folds them
/// into the error state and the frontend only ever shows [`ERROR_TEXT`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division with a divisor that is exactly zero
    #[error("Division by zero")]
    DivisionByZero,
    /// Operand string that is not a finite decimal
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),
    /// Operator label outside `+ − × ÷`
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),
    /// Result magnitude beyond `10^±MAX_EXPONENT`
    #[error("Overflow: result outside displayable range")]
    Overflow,
}
