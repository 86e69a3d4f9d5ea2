//! Sequential evaluation state machine
//!
//! Operators apply strictly left to right as they are pressed: `2 + 3 * 4 =`
//! is `(2 + 3) * 4`. The machine is a plain value; [`Evaluator::transition`]
//! is a pure function from `(state, event)` to `(next state, render output)`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{CalcError, CalcResult, Calculator, Entry, Number, Operation};

/// Machine state, i.e. the operator waiting for its right-hand operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// No operand committed yet
    #[default]
    Idle,
    /// `+` pending
    Add,
    /// `-` pending
    Subtract,
    /// `*` pending
    Multiply,
    /// `/` pending
    Divide,
    /// Last action was `=`; the next digit starts a fresh operand
    Result,
}

impl Mode {
    /// The operation this mode applies to the next operand, if any
    #[must_use]
    pub const fn pending(self) -> Option<Operation> {
        match self {
            Self::Add => Some(Operation::Add),
            Self::Subtract => Some(Operation::Subtract),
            Self::Multiply => Some(Operation::Multiply),
            Self::Divide => Some(Operation::Divide),
            Self::Idle | Self::Result => None,
        }
    }

    /// Short name for status lines and logs
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "mult",
            Self::Divide => "divide",
            Self::Result => "result",
        }
    }
}

impl From<Operation> for Mode {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Add => Self::Add,
            Operation::Subtract => Self::Subtract,
            Operation::Multiply => Self::Multiply,
            Operation::Divide => Self::Divide,
        }
    }
}

/// Operator keys, including `=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKey {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `=`
    Equals,
}

impl OperatorKey {
    /// Maps a key symbol to an operator key
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '=' => Some(Self::Equals),
            _ => None,
        }
    }

    /// Key symbol
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Equals => '=',
        }
    }

    /// The arithmetic operation, `None` for `=`
    #[must_use]
    pub const fn operation(self) -> Option<Operation> {
        match self {
            Self::Add => Some(Operation::Add),
            Self::Subtract => Some(Operation::Subtract),
            Self::Multiply => Some(Operation::Multiply),
            Self::Divide => Some(Operation::Divide),
            Self::Equals => None,
        }
    }

    /// Mode entered after this key is handled
    #[must_use]
    pub const fn target_mode(self) -> Mode {
        match self {
            Self::Add => Mode::Add,
            Self::Subtract => Mode::Subtract,
            Self::Multiply => Mode::Multiply,
            Self::Divide => Mode::Divide,
            Self::Equals => Mode::Result,
        }
    }
}

/// Input events accepted by the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// A digit `0-9` or the decimal point
    Digit(char),
    /// An operator or `=`
    Operator(OperatorKey),
    /// Reset display and state
    Clear,
}

impl Event {
    /// Characters accepted as digit events
    pub const DIGITS: &'static str = "0123456789.";

    /// Maps a key character to an event; `None` for keys the calculator
    /// does not know. Enter (`\r`, `\n`) counts as `=`.
    #[must_use]
    pub fn from_char(key: char) -> Option<Self> {
        match key {
            c if Self::DIGITS.contains(c) => Some(Self::Digit(c)),
            'c' | 'C' => Some(Self::Clear),
            '\r' | '\n' => Some(Self::Operator(OperatorKey::Equals)),
            c => OperatorKey::from_symbol(c).map(Self::Operator),
        }
    }
}

/// What a front end should show after an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInstruction {
    /// Display text
    pub display: String,
    /// Mode after the event
    pub mode: Mode,
    /// Set when the event was rejected; state is then unchanged
    pub error: Option<CalcError>,
}

impl RenderInstruction {
    /// Returns true if the event was accepted
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Converts into a `Result`, dropping the display on rejection
    pub fn into_result(self) -> CalcResult<String> {
        match self.error {
            None => Ok(self.display),
            Some(e) => Err(e),
        }
    }
}

/// Serializable view of the machine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Display text
    pub display: String,
    /// Current mode
    pub mode: Mode,
    /// Running result, if any operand has been committed
    pub accumulator: Option<Number>,
}

/// The evaluator state machine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluator {
    mode: Mode,
    accumulator: Option<Number>,
    entry: Entry,
    /// Last applied operation and operand, replayed by a repeated `=`
    repeat: Option<(Operation, Number)>,
}

impl Evaluator {
    /// Creates an evaluator in the `Idle` state with an empty display
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Running result
    #[must_use]
    pub const fn accumulator(&self) -> Option<Number> {
        self.accumulator
    }

    /// Display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.entry.text()
    }

    /// Display buffer
    #[must_use]
    pub const fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Serializable view of the current state
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.display().to_string(),
            mode: self.mode,
            accumulator: self.accumulator,
        }
    }

    /// Computes the next state without touching `self`.
    ///
    /// A rejected event yields an unchanged copy of the current state and a
    /// render instruction carrying the error.
    #[must_use]
    pub fn transition(&self, event: Event) -> (Self, RenderInstruction) {
        let mut next = self.clone();
        match next.apply(event) {
            Ok(()) => {
                debug!(?event, mode = next.mode.label(), display = next.display(), "event applied");
                let render = next.render(None);
                (next, render)
            }
            Err(error) => {
                warn!(?event, mode = self.mode.label(), %error, "event rejected");
                (self.clone(), self.render(Some(error)))
            }
        }
    }

    /// Applies an event in place
    pub fn handle(&mut self, event: Event) -> RenderInstruction {
        let (next, render) = self.transition(event);
        *self = next;
        render
    }

    /// Handles a raw key. Unknown keys are ignored and yield `None`.
    pub fn press(&mut self, key: char) -> Option<RenderInstruction> {
        match Event::from_char(key) {
            Some(event) => Some(self.handle(event)),
            None => {
                debug!(?key, "key is not part of the calculator");
                None
            }
        }
    }

    /// Digit or decimal point
    pub fn on_digit(&mut self, digit: char) -> CalcResult<()> {
        self.handle(Event::Digit(digit)).into_result().map(drop)
    }

    /// Operator or `=`
    pub fn on_operator(&mut self, key: OperatorKey) -> CalcResult<()> {
        self.handle(Event::Operator(key)).into_result().map(drop)
    }

    /// Clear display and state
    pub fn on_clear(&mut self) {
        self.handle(Event::Clear);
    }

    fn render(&self, error: Option<CalcError>) -> RenderInstruction {
        RenderInstruction {
            display: self.display().to_string(),
            mode: self.mode,
            error,
        }
    }

    fn apply(&mut self, event: Event) -> CalcResult<()> {
        match event {
            Event::Digit(digit) => self.apply_digit(digit),
            Event::Operator(key) => self.apply_operator(key),
            Event::Clear => {
                self.reset();
                Ok(())
            }
        }
    }

    fn reset(&mut self) {
        self.entry.delete_all();
        self.mode = Mode::Idle;
        self.accumulator = None;
        self.repeat = None;
    }

    fn apply_digit(&mut self, digit: char) -> CalcResult<()> {
        if !Event::DIGITS.contains(digit) {
            return Err(CalcError::UnrecognizedKey(digit));
        }
        if self.mode == Mode::Result {
            self.reset();
        }
        self.entry.insert(digit);
        Ok(())
    }

    fn apply_operator(&mut self, key: OperatorKey) -> CalcResult<()> {
        // A minus on an empty display starts a negative first operand
        if key == OperatorKey::Subtract && self.mode == Mode::Idle && self.entry.is_empty() {
            self.entry.insert(OperatorKey::Subtract.symbol());
            return Ok(());
        }

        match self.mode {
            Mode::Idle => {
                self.accumulator = Some(Number::parse(self.entry.operand())?);
                self.repeat = None;
            }
            Mode::Result => {
                if key == OperatorKey::Equals {
                    self.replay()?;
                }
            }
            Mode::Add | Mode::Subtract | Mode::Multiply | Mode::Divide => {
                let operand = Number::parse(self.entry.operand())?;
                self.combine(operand)?;
            }
        }

        if let Some(op) = key.operation() {
            self.entry.push_operator(op);
        }
        self.mode = key.target_mode();
        Ok(())
    }

    /// Applies the pending operation to the accumulator
    fn combine(&mut self, operand: Number) -> CalcResult<()> {
        let (Some(op), Some(acc)) = (self.mode.pending(), self.accumulator) else {
            self.accumulator = Some(operand);
            return Ok(());
        };
        let value = Calculator::calculate(acc, operand, op)?;
        self.accumulator = Some(value);
        self.repeat = Some((op, operand));
        self.entry.show(value);
        Ok(())
    }

    /// Re-applies the last operation after a repeated `=`
    fn replay(&mut self) -> CalcResult<()> {
        let (Some((op, operand)), Some(acc)) = (self.repeat, self.accumulator) else {
            return Ok(());
        };
        let value = Calculator::calculate(acc, operand, op)?;
        self.accumulator = Some(value);
        self.entry.show(value);
        Ok(())
    }
}
