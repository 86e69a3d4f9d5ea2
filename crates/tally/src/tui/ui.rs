//! Screen rendering into a [`TextGrid`]

use crate::tui::app::CalculatorApp;
use crate::tui::grid::{Rect, TextGrid};
use crate::tui::keypad::Keypad;

/// Title shown on the outer border
pub const TITLE: &str = " tally - sequential calculator ";

/// Key hints on the bottom line
pub const HELP: &str = "q quit  c/esc clear  enter =";

/// Smallest screen the full layout fits in
pub const MIN_SIZE: (u16, u16) = (28, 14);

/// Where each part of the screen goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Bordered single-line display
    pub entry: Rect,
    /// Status line
    pub status: Rect,
    /// Keypad, border included
    pub keypad: Rect,
    /// Key hints
    pub help: Rect,
}

impl ScreenLayout {
    /// Lays the screen out top to bottom inside the outer border
    #[must_use]
    pub fn compute(area: Rect, keypad: &Keypad) -> Self {
        let inner = area.inner();
        let (pad_w, pad_h) = keypad.required_size();
        let entry = Rect::new(inner.x, inner.y, inner.width, 3);
        let status = Rect::new(inner.x + 1, entry.y + entry.height, inner.width.saturating_sub(1), 1);
        let keypad = Rect::new(inner.x, status.y + 1, pad_w.min(inner.width), pad_h);
        let help = Rect::new(inner.x + 1, keypad.y + keypad.height, inner.width.saturating_sub(1), 1);
        Self {
            entry,
            status,
            keypad,
            help,
        }
    }
}

/// Renders the calculator UI to the grid
pub fn render(app: &CalculatorApp, grid: &mut TextGrid) {
    grid.clear();
    let area = grid.area();
    if area.width < MIN_SIZE.0 || area.height < MIN_SIZE.1 {
        grid.write_str(0, 0, "terminal too small");
        return;
    }

    grid.draw_box(area, TITLE);
    let layout = ScreenLayout::compute(area, app.keypad());

    grid.draw_box(layout.entry, " Entry ");
    let field = layout.entry.inner();
    grid.write_str(field.x, field.y, &visible_tail(app.display(), field.width));

    grid.write_clipped(layout.status.x, layout.status.y, &app.status_line(), layout.status.width);
    app.keypad().render(layout.keypad, grid);
    grid.write_clipped(layout.help.x, layout.help.y, HELP, layout.help.width);
}

/// The last `width` characters of `text`; long entries scroll left
fn visible_tail(text: &str, width: u16) -> String {
    let count = text.chars().count();
    let skip = count.saturating_sub(width as usize);
    text.chars().skip(skip).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Event;

    fn app_after(keys: &str) -> CalculatorApp {
        let mut app = CalculatorApp::new();
        for c in keys.chars() {
            if let Some(event) = Event::from_char(c) {
                app.dispatch(event);
            }
        }
        app
    }

    fn draw(app: &CalculatorApp) -> Vec<String> {
        let mut grid = TextGrid::new(40, 16);
        render(app, &mut grid);
        grid.to_lines()
    }

    #[test]
    fn test_layout_stacks_sections() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 40, 16), &Keypad::new());
        assert_eq!(layout.entry, Rect::new(1, 1, 38, 3));
        assert_eq!(layout.status.y, 4);
        assert_eq!(layout.keypad, Rect::new(1, 5, 26, 7));
        assert_eq!(layout.help.y, 12);
    }

    #[test]
    fn test_render_title_and_help() {
        let lines = draw(&CalculatorApp::new());
        assert!(lines[0].contains("tally"));
        assert!(lines.iter().any(|l| l.contains("q quit")));
    }

    #[test]
    fn test_render_entry_text() {
        let lines = draw(&app_after("12+7"));
        assert!(lines[2].contains("12+7"));
    }

    #[test]
    fn test_render_result() {
        let lines = draw(&app_after("9.1*6="));
        assert!(lines[2].contains("54.6"));
        assert!(lines[4].contains("result"));
    }

    #[test]
    fn test_render_error_status() {
        let lines = draw(&app_after("5/0="));
        assert!(lines[2].contains("5/0"));
        assert!(lines[4].contains("Division by zero"));
    }

    #[test]
    fn test_render_keypad_highlight() {
        let lines = draw(&app_after("7"));
        assert!(lines.iter().any(|l| l.contains(">7<")));
    }

    #[test]
    fn test_render_too_small() {
        let mut grid = TextGrid::new(10, 4);
        render(&CalculatorApp::new(), &mut grid);
        assert_eq!(grid.to_lines()[0], "terminal too small");
    }

    #[test]
    fn test_render_minimum_size_fits() {
        let mut grid = TextGrid::new(MIN_SIZE.0, MIN_SIZE.1);
        render(&app_after("1+2"), &mut grid);
        let lines = grid.to_lines();
        assert!(lines[2].contains("1+2"));
        assert!(lines[MIN_SIZE.1 as usize - 2].contains("q quit"));
    }

    #[test]
    fn test_visible_tail() {
        assert_eq!(visible_tail("12345", 3), "345");
        assert_eq!(visible_tail("12", 3), "12");
    }
}
