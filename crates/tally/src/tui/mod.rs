//! Terminal front end
//!
//! Screens are composed into a [`TextGrid`] and flushed by the binary; the
//! pieces here never touch the terminal themselves.

mod app;
mod grid;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use grid::{Rect, TextGrid};
pub use input::{InputHandler, KeyAction};
pub use keypad::{ButtonAction, Keypad, KeypadButton, BUTTON_WIDTH};
pub use ui::{render, ScreenLayout, HELP, MIN_SIZE, TITLE};
