//! Core calculator: numbers, arithmetic and the evaluation state machine
//!
//! Everything in here is pure, synchronous and free of I/O. Front ends feed
//! [`Event`]s into an [`Evaluator`] and render the returned display text.

mod entry;
pub mod evaluator;
mod number;
mod operations;

pub use entry::Entry;
pub use evaluator::{Evaluator, Event, Mode, OperatorKey, RenderInstruction, Snapshot};
pub use number::Number;
pub use operations::{Calculator, Operation};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors a single event can raise. A rejected event never changes state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The operand text could not be parsed as an integer or a decimal
    #[error("incorrect number inserted: {0:?}")]
    InvalidOperand(String),
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// A decimal result is not finite
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
    /// A digit event carried something other than `0-9` or `.`
    #[error("{0:?} is not part of the calculator")]
    UnrecognizedKey(char),
}

impl CalcError {
    /// Short indicator suitable for a one-line status area
    #[must_use]
    pub const fn indicator(&self) -> &'static str {
        match self {
            Self::InvalidOperand(_) => "Err: operand",
            Self::DivisionByZero => "Err: div by 0",
            Self::Overflow => "Err: overflow",
            Self::UnrecognizedKey(_) => "Err: key",
        }
    }
}
