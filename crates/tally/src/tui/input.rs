//! Keyboard and mouse input mapping
//!
//! Raw terminal events are filtered down to evaluator events here; the
//! evaluator never sees a key it does not understand.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::debug;

use crate::core::{Event, OperatorKey};
use crate::tui::grid::Rect;
use crate::tui::keypad::Keypad;

/// Actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward an event to the evaluator
    Calc(Event),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps terminal events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        let action = match code {
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char(c) => Event::from_char(c).map_or(KeyAction::None, KeyAction::Calc),
            KeyCode::Enter => KeyAction::Calc(Event::Operator(OperatorKey::Equals)),
            KeyCode::Esc | KeyCode::Delete => KeyAction::Calc(Event::Clear),
            _ => KeyAction::None,
        };
        if action == KeyAction::None {
            debug!(?code, "key is not part of the calculator");
        }
        action
    }

    /// Maps a left click on the keypad to the button's event
    #[must_use]
    pub fn handle_mouse(&self, event: MouseEvent, keypad: &Keypad, area: Rect) -> KeyAction {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => keypad
                .hit_test(area, event.column, event.row)
                .map_or(KeyAction::None, |btn| KeyAction::Calc(btn.action.to_event())),
            _ => KeyAction::None,
        }
    }
}
