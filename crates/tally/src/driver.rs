//! Front-end drivers
//!
//! Behavior checks are written once against [`CalculatorDriver`] and run
//! against both the bare evaluator and the terminal front end.

use crate::core::{CalcError, CalcResult, Evaluator, Mode};

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Feeds a key sequence, one character per key.
    ///
    /// Unknown keys are skipped. Every key is processed; the first
    /// rejection, if any, is returned.
    fn press_keys(&mut self, keys: &str) -> CalcResult<()>;

    /// Current display text
    fn display(&self) -> String;

    /// Current mode
    fn mode(&self) -> Mode;

    /// Resets the calculator
    fn clear(&mut self);
}

impl CalculatorDriver for Evaluator {
    fn press_keys(&mut self, keys: &str) -> CalcResult<()> {
        let mut first = None;
        for key in keys.chars() {
            if let Some(error) = self.press(key).and_then(|render| render.error) {
                first.get_or_insert(error);
            }
        }
        first.map_or(Ok(()), Err)
    }

    fn display(&self) -> String {
        Self::display(self).to_string()
    }

    fn mode(&self) -> Mode {
        Self::mode(self)
    }

    fn clear(&mut self) {
        self.on_clear();
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    use super::{CalcError, CalcResult, CalculatorDriver, Mode};
    use crate::core::Event;
    use crate::tui::{
        render, CalculatorApp, InputHandler, KeyAction, Keypad, Rect, ScreenLayout, TextGrid,
    };

    /// Screen the driver pretends to run on
    const SCREEN: Rect = Rect::new(0, 0, 40, 16);

    /// Drives the TUI app with synthetic terminal events
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
        input: InputHandler,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self {
                app,
                input: InputHandler::new(),
            }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub const fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Sends one key event through the input mapping
        pub fn send_key(&mut self, event: KeyEvent) -> CalcResult<()> {
            let action = self.input.handle_key(event);
            self.perform(action)
        }

        /// Clicks the keypad button with `label`
        pub fn click(&mut self, label: char) -> CalcResult<()> {
            let keypad_area = ScreenLayout::compute(SCREEN, self.app.keypad()).keypad;
            let (row, col) = self
                .app
                .keypad()
                .find_button_by_label(label)
                .ok_or(CalcError::UnrecognizedKey(label))?;
            let (column, row) = Keypad::button_origin(keypad_area, row, col);
            let click = MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            };
            let action = self.input.handle_mouse(click, self.app.keypad(), keypad_area);
            self.perform(action)
        }

        /// Renders the current screen
        #[must_use]
        pub fn screen(&self) -> TextGrid {
            let mut grid = TextGrid::new(SCREEN.width, SCREEN.height);
            render(&self.app, &mut grid);
            grid
        }

        fn perform(&mut self, action: KeyAction) -> CalcResult<()> {
            match action {
                KeyAction::Calc(event) => self.app.dispatch(event).into_result().map(drop),
                KeyAction::Quit => {
                    self.app.quit();
                    Ok(())
                }
                KeyAction::None => Ok(()),
            }
        }
    }

    /// Terminal key code for a character key
    fn key_code(key: char) -> KeyCode {
        match key {
            '\r' | '\n' => KeyCode::Enter,
            c => KeyCode::Char(c),
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press_keys(&mut self, keys: &str) -> CalcResult<()> {
            let mut first = None;
            for key in keys.chars() {
                if let Err(error) = self.send_key(KeyEvent::new(key_code(key), KeyModifiers::NONE)) {
                    first.get_or_insert(error);
                }
            }
            first.map_or(Ok(()), Err)
        }

        fn display(&self) -> String {
            self.app.display().to_string()
        }

        fn mode(&self) -> Mode {
            self.app.mode()
        }

        fn clear(&mut self) {
            self.app.dispatch(Event::Clear);
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Shared behavior checks =====
// These work with ANY CalculatorDriver implementation

/// Integer arithmetic stays integral
pub fn verify_integer_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    for (keys, expected) in [("12+30=", "42"), ("10-4=", "6"), ("6*7=", "42"), ("20/4=", "5")] {
        driver.clear();
        assert_eq!(driver.press_keys(keys), Ok(()));
        assert_eq!(driver.display(), expected, "keys {keys:?}");
        assert_eq!(driver.mode(), Mode::Result);
    }
    driver.clear();
}

/// Operators apply in the order they are pressed
pub fn verify_left_to_right<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert_eq!(driver.press_keys("2+3*4="), Ok(()));
    assert_eq!(driver.display(), "20");
    driver.clear();
}

/// Decimal products do not pick up binary noise
pub fn verify_decimal_multiply<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert_eq!(driver.press_keys("9.1*6="), Ok(()));
    assert_eq!(driver.display(), "54.6");
    driver.clear();
}

/// Division by zero is rejected and the calculator recovers
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert_eq!(driver.press_keys("5/0="), Err(CalcError::DivisionByZero));
    assert_eq!(driver.display(), "5/0");
    assert_eq!(driver.mode(), Mode::Divide);

    assert_eq!(driver.press_keys("2="), Ok(()));
    assert_eq!(driver.display(), "2.5");
    driver.clear();
}

/// A digit after a result starts a new calculation
pub fn verify_result_then_digit<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert_eq!(driver.press_keys("5+3="), Ok(()));
    assert_eq!(driver.display(), "8");
    assert_eq!(driver.press_keys("9"), Ok(()));
    assert_eq!(driver.display(), "9");
    assert_eq!(driver.mode(), Mode::Idle);
    driver.clear();
}

/// A leading minus is a sign, not an operator
pub fn verify_leading_minus<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert_eq!(driver.press_keys("-"), Ok(()));
    assert_eq!(driver.display(), "-");
    assert_eq!(driver.mode(), Mode::Idle);
    assert_eq!(driver.press_keys("5+2="), Ok(()));
    assert_eq!(driver.display(), "-3");
    driver.clear();
}

/// Repeated `=` re-applies the last operation
pub fn verify_repeated_equals<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert_eq!(driver.press_keys("5+3=="), Ok(()));
    assert_eq!(driver.display(), "11");
    driver.clear();
}

/// Clear always returns to an empty idle calculator
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) {
    for keys in ["5", "5+", "5+3", "5+3="] {
        assert_eq!(driver.press_keys(keys), Ok(()));
        driver.clear();
        assert_eq!(driver.display(), "");
        assert_eq!(driver.mode(), Mode::Idle);
    }
}

/// Runs every shared check
pub fn run_all_checks<D: CalculatorDriver>(driver: &mut D) {
    verify_integer_arithmetic(driver);
    verify_left_to_right(driver);
    verify_decimal_multiply(driver);
    verify_division_by_zero(driver);
    verify_result_then_digit(driver);
    verify_leading_minus(driver);
    verify_repeated_equals(driver);
    verify_clear(driver);
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Evaluator driver =====

    #[test]
    fn test_evaluator_press_keys_reports_first_error() {
        let mut eval = Evaluator::new();
        assert_eq!(eval.press_keys("5/0=+"), Err(CalcError::DivisionByZero));
        assert_eq!(CalculatorDriver::display(&eval), "5/0");
    }

    #[test]
    fn test_evaluator_press_keys_skips_unknown() {
        let mut eval = Evaluator::new();
        assert_eq!(eval.press_keys("1x2"), Ok(()));
        assert_eq!(CalculatorDriver::display(&eval), "12");
    }

    #[test]
    fn test_evaluator_all_checks() {
        run_all_checks(&mut Evaluator::new());
    }

    // ===== TUI driver =====

    #[cfg(feature = "tui")]
    mod tui_tests {
        use super::*;
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        #[test]
        fn test_tui_driver_new() {
            let driver = TuiDriver::new();
            assert!(driver.display().is_empty());
            assert!(!driver.app().should_quit());
        }

        #[test]
        fn test_tui_driver_with_app() {
            let mut app = crate::tui::CalculatorApp::new();
            app.dispatch(crate::core::Event::Digit('3'));
            let driver = TuiDriver::with_app(app);
            assert_eq!(driver.display(), "3");
        }

        #[test]
        fn test_tui_driver_enter_key() {
            let mut driver = TuiDriver::new();
            assert_eq!(driver.press_keys("6*7\r"), Ok(()));
            assert_eq!(driver.display(), "42");
        }

        #[test]
        fn test_tui_driver_escape_clears() {
            let mut driver = TuiDriver::new();
            driver.press_keys("12+").unwrap();
            driver
                .send_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
                .unwrap();
            assert_eq!(driver.display(), "");
            assert_eq!(driver.mode(), Mode::Idle);
        }

        #[test]
        fn test_tui_driver_quit_key() {
            let mut driver = TuiDriver::new();
            driver.press_keys("q").unwrap();
            assert!(driver.app().should_quit());
        }

        #[test]
        fn test_tui_driver_clicks() {
            let mut driver = TuiDriver::new();
            for label in ['7', '+', '2', '='] {
                driver.click(label).unwrap();
            }
            assert_eq!(driver.display(), "9");
            driver.click('C').unwrap();
            assert_eq!(driver.display(), "");
        }

        #[test]
        fn test_tui_driver_click_unknown_label() {
            let mut driver = TuiDriver::new();
            assert_eq!(driver.click('%'), Err(CalcError::UnrecognizedKey('%')));
        }

        #[test]
        fn test_tui_driver_screen_shows_error() {
            let mut driver = TuiDriver::new();
            let _ = driver.press_keys("5/0=");
            let screen = driver.screen();
            assert!(screen.contains_text("5/0"));
            assert!(screen.contains_text("Err: div by 0"));
        }

        #[test]
        fn test_tui_driver_all_checks() {
            run_all_checks(&mut TuiDriver::new());
        }
    }
}
