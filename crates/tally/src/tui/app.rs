//! TUI application state
//!
//! A thin shell: it forwards events to the evaluator, keeps the last error
//! for the status line and tracks keypad highlighting.

use crate::core::{CalcError, Evaluator, Event, Mode, RenderInstruction};
use crate::tui::input::KeyAction;
use crate::tui::keypad::Keypad;

/// Calculator application state
#[derive(Debug, Default)]
pub struct CalculatorApp {
    evaluator: Evaluator,
    keypad: Keypad,
    /// Error raised by the most recent event, cleared by the next accepted one
    error: Option<CalcError>,
    should_quit: bool,
}

impl CalculatorApp {
    /// Creates a new calculator app
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the evaluator
    #[must_use]
    pub const fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Returns the display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.evaluator.display()
    }

    /// Returns the current mode
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.evaluator.mode()
    }

    /// Returns the error raised by the last event, if any
    #[must_use]
    pub const fn error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    /// Returns the keypad
    #[must_use]
    pub const fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns whether the app should quit
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Forwards an event to the evaluator
    pub fn dispatch(&mut self, event: Event) -> RenderInstruction {
        self.keypad.highlight_event(event);
        let render = self.evaluator.handle(event);
        self.error.clone_from(&render.error);
        render
    }

    /// Applies an input action
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Calc(event) => {
                self.dispatch(event);
            }
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// One-line status: the last error, or the current mode
    #[must_use]
    pub fn status_line(&self) -> String {
        match &self.error {
            Some(e) => format!("✗ {}: {e}", e.indicator()),
            None => format!("✓ {}", self.mode().label()),
        }
    }
}
