//! On-screen keypad
//!
//! Buttons map one-to-one onto evaluator events. The keypad can be clicked
//! with the mouse and highlights the button matching the last key pressed.
//!
//! ```text
//! [ C ] [ = ]
//! [ 1 ] [ 2 ] [ 3 ] [ / ]
//! [ 4 ] [ 5 ] [ 6 ] [ * ]
//! [ 7 ] [ 8 ] [ 9 ] [ - ]
//! [ 0 ] [ . ] [ + ]
//! ```

use crate::core::{Event, Operation, OperatorKey};
use crate::tui::grid::{Rect, TextGrid};

/// Width of one button cell, including the gap
pub const BUTTON_WIDTH: u16 = 6;

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The character on the button
    pub label: char,
    /// Whether the button is currently highlighted
    pub pressed: bool,
    /// The action this button performs
    pub action: ButtonAction,
}

/// Actions that keypad buttons can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Insert a digit (0-9)
    Digit(u8),
    /// Insert a decimal point
    Decimal,
    /// Apply an operator
    Operator(Operation),
    /// Evaluate
    Equals,
    /// Clear display and state
    Clear,
}

impl ButtonAction {
    /// Evaluator event fired by this action
    #[must_use]
    pub fn to_event(self) -> Event {
        match self {
            Self::Digit(d) => Event::Digit(char::from(b'0' + d.min(9))),
            Self::Decimal => Event::Digit('.'),
            Self::Operator(op) => Event::Operator(match op {
                Operation::Add => OperatorKey::Add,
                Operation::Subtract => OperatorKey::Subtract,
                Operation::Multiply => OperatorKey::Multiply,
                Operation::Divide => OperatorKey::Divide,
            }),
            Self::Equals => Event::Operator(OperatorKey::Equals),
            Self::Clear => Event::Clear,
        }
    }
}

impl KeypadButton {
    /// Creates a new digit button
    #[must_use]
    pub fn digit(d: u8) -> Self {
        Self::with_action(ButtonAction::Digit(d))
    }

    /// Creates a new operator button
    #[must_use]
    pub fn operator(op: Operation) -> Self {
        Self::with_action(ButtonAction::Operator(op))
    }

    /// Creates the decimal point button
    #[must_use]
    pub fn decimal() -> Self {
        Self::with_action(ButtonAction::Decimal)
    }

    /// Creates the equals button
    #[must_use]
    pub fn equals() -> Self {
        Self::with_action(ButtonAction::Equals)
    }

    /// Creates the clear button
    #[must_use]
    pub fn clear() -> Self {
        Self::with_action(ButtonAction::Clear)
    }

    fn with_action(action: ButtonAction) -> Self {
        let label = match action {
            ButtonAction::Digit(d) => char::from_digit(u32::from(d), 10).unwrap_or('?'),
            ButtonAction::Decimal => '.',
            ButtonAction::Operator(op) => op.symbol(),
            ButtonAction::Equals => '=',
            ButtonAction::Clear => 'C',
        };
        Self {
            label,
            pressed: false,
            action,
        }
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Label as drawn on screen
    #[must_use]
    pub fn face(&self) -> String {
        if self.pressed {
            format!(">{}<", self.label)
        } else {
            format!("[{}]", self.label)
        }
    }
}

/// The keypad layout: rows of buttons, at most four per row
#[derive(Debug, Clone)]
pub struct Keypad {
    rows: Vec<Vec<KeypadButton>>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Maximum number of buttons in a row
    pub const COLS: usize = 4;

    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let rows = vec![
            vec![KeypadButton::clear(), KeypadButton::equals()],
            vec![
                KeypadButton::digit(1),
                KeypadButton::digit(2),
                KeypadButton::digit(3),
                KeypadButton::operator(Operation::Divide),
            ],
            vec![
                KeypadButton::digit(4),
                KeypadButton::digit(5),
                KeypadButton::digit(6),
                KeypadButton::operator(Operation::Multiply),
            ],
            vec![
                KeypadButton::digit(7),
                KeypadButton::digit(8),
                KeypadButton::digit(9),
                KeypadButton::operator(Operation::Subtract),
            ],
            vec![
                KeypadButton::digit(0),
                KeypadButton::decimal(),
                KeypadButton::operator(Operation::Add),
            ],
        ];
        Self { rows }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows.len(), Self::COLS)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Finds a button by its label character
    #[must_use]
    pub fn find_button_by_label(&self, label: char) -> Option<(usize, usize)> {
        self.buttons_with_positions()
            .find(|(_, b)| b.label == label)
            .map(|(pos, _)| pos)
    }

    /// Finds the button that fires `event`
    #[must_use]
    pub fn find_button_for_event(&self, event: Event) -> Option<(usize, usize)> {
        self.buttons_with_positions()
            .find(|(_, b)| b.action.to_event() == event)
            .map(|(pos, _)| pos)
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in self.rows.iter_mut().flatten() {
            btn.set_pressed(false);
        }
    }

    /// Highlights the button for `event`, releasing any other
    pub fn highlight_event(&mut self, event: Event) {
        self.release_all();
        if let Some((row, col)) = self.find_button_for_event(event) {
            if let Some(btn) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
                btn.set_pressed(true);
            }
        }
    }

    /// Returns an iterator over buttons with their (row, col) positions
    pub fn buttons_with_positions(
        &self,
    ) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.rows.iter().enumerate().flat_map(|(row, buttons)| {
            buttons
                .iter()
                .enumerate()
                .map(move |(col, btn)| ((row, col), btn))
        })
    }

    /// Area the keypad needs, border included
    #[must_use]
    pub fn required_size(&self) -> (u16, u16) {
        (
            BUTTON_WIDTH * Self::COLS as u16 + 2,
            self.rows.len() as u16 + 2,
        )
    }

    /// Converts a click position to the button under it
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<&KeypadButton> {
        let inner = area.inner();
        if !inner.contains(x, y) {
            return None;
        }
        let col = ((x - inner.x) / BUTTON_WIDTH) as usize;
        let row = (y - inner.y) as usize;
        self.get_button_at(row, col)
    }

    /// Cell where the face of the button at (row, col) starts
    #[must_use]
    pub const fn button_origin(area: Rect, row: usize, col: usize) -> (u16, u16) {
        let inner = area.inner();
        (inner.x + col as u16 * BUTTON_WIDTH + 1, inner.y + row as u16)
    }

    /// Draws the keypad into `area`
    pub fn render(&self, area: Rect, grid: &mut TextGrid) {
        grid.draw_box(area, " Keypad ");
        let inner = area.inner();
        for ((row, col), btn) in self.buttons_with_positions() {
            let (x, y) = Self::button_origin(area, row, col);
            if y < inner.y + inner.height && x + 3 <= inner.x + inner.width {
                grid.write_str(x, y, &btn.face());
            }
        }
    }
}
