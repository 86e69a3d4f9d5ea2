//! Display buffer with an explicit operand boundary

use crate::core::{Number, Operation};

/// The single-line display.
///
/// Holds the rendered text plus the byte offset where the operand currently
/// being typed begins. Everything before the offset is annotation (the
/// accumulator and the pending operator symbol); it is never re-parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    text: String,
    operand_start: usize,
}

impl Entry {
    /// Creates an empty entry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Full display text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The operand being typed (text after the last operator symbol)
    #[must_use]
    pub fn operand(&self) -> &str {
        &self.text[self.operand_start..]
    }

    /// Returns true if nothing is displayed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Appends a character at the end
    pub fn insert(&mut self, c: char) {
        self.text.push(c);
    }

    /// Empties the display
    pub fn delete_all(&mut self) {
        self.text.clear();
        self.operand_start = 0;
    }

    /// Replaces the display with a value; the value becomes the operand
    pub(crate) fn show(&mut self, value: Number) {
        self.delete_all();
        self.text.push_str(&value.to_string());
    }

    /// Appends an operator symbol and starts a new, empty operand after it
    pub(crate) fn push_operator(&mut self, op: Operation) {
        self.text.push(op.symbol());
        self.operand_start = self.text.len();
    }
}
