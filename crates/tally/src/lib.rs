//! Tally - a sequential calculator
//!
//! Operators are applied strictly left to right as they are pressed, the
//! way a pocket calculator does it: `2 + 3 * 4 =` gives `20`, not `14`.
//!
//! The core is a pure state machine. A front end turns raw keys into
//! [`core::Event`]s, hands them to the [`core::Evaluator`] and shows the
//! display text it gets back.
//!
//! # Example
//!
//! ```rust
//! use tally::prelude::*;
//!
//! let mut eval = Evaluator::new();
//! for key in "9.1*6=".chars() {
//!     eval.press(key);
//! }
//! assert_eq!(eval.display(), "54.6");
//!
//! // Rejected events leave the state untouched
//! let mut eval = Evaluator::new();
//! for key in "5/0".chars() {
//!     eval.press(key);
//! }
//! let render = eval.handle(Event::Operator(OperatorKey::Equals));
//! assert_eq!(render.error, Some(CalcError::DivisionByZero));
//! assert_eq!(eval.display(), "5/0");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::{
        CalcError, CalcResult, Calculator, Evaluator, Event, Mode, Number, Operation, OperatorKey,
        RenderInstruction, Snapshot,
    };
    pub use crate::driver::CalculatorDriver;

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut eval = Evaluator::new();
        assert_eq!(eval.press_keys("2+3="), Ok(()));
        assert_eq!(eval.accumulator(), Some(Number::Integer(5)));
    }

    #[test]
    fn test_calculator_direct() {
        let product = Calculator::calculate(Number::Integer(6), Number::Integer(7), Operation::Multiply);
        assert_eq!(product, Ok(Number::Integer(42)));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut eval = Evaluator::new();
        eval.press_keys("7/2=").unwrap();
        let json = serde_json::to_value(eval.snapshot()).unwrap();
        assert_eq!(json["display"], "3.5");
        assert_eq!(json["mode"], "result");
        assert_eq!(json["accumulator"]["kind"], "decimal");
    }

    #[test]
    fn test_render_instruction_mode() {
        let mut eval = Evaluator::new();
        eval.press_keys("8").unwrap();
        let render: RenderInstruction = eval.handle(Event::Operator(OperatorKey::Subtract));
        assert_eq!(render.mode, Mode::Subtract);
        assert_eq!(render.display, "8-");
    }
}
