//! Interactive full-screen calculator on a crossterm terminal

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent},
    execute, queue,
    style::Print,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use tally::tui::{render, CalculatorApp, InputHandler, KeyAction, ScreenLayout, TextGrid};
use tracing::info;

use crate::error::CliResult;

/// Raw mode and alternate screen, undone on drop
struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // Constructed first so a failed setup below is still undone
        let guard = Self { active: true };
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(guard)
    }

    /// Leaves the alternate screen and raw mode. Later calls do nothing.
    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let screen = execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen);
        let raw = disable_raw_mode();
        screen.and(raw)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Runs the calculator until the user quits
pub fn run_tui() -> CliResult<()> {
    info!("starting terminal calculator");
    let mut guard = TerminalGuard::enter()?;

    let result = run_app(&mut io::stdout());

    let restored = guard.restore();
    result?;
    restored?;
    Ok(())
}

fn run_app(out: &mut impl Write) -> CliResult<()> {
    let mut app = CalculatorApp::new();
    let input_handler = InputHandler::new();
    let (width, height) = terminal::size()?;
    let mut grid = TextGrid::new(width, height);

    loop {
        render(&app, &mut grid);
        draw(out, &grid)?;

        let action = match event::read()? {
            TermEvent::Key(key) => input_handler.handle_key(key),
            TermEvent::Mouse(mouse) => {
                let layout = ScreenLayout::compute(grid.area(), app.keypad());
                input_handler.handle_mouse(mouse, app.keypad(), layout.keypad)
            }
            TermEvent::Resize(width, height) => {
                grid.resize(width, height);
                KeyAction::None
            }
            _ => KeyAction::None,
        };
        app.apply(action);

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Flushes the grid to the terminal, one line at a time
pub fn draw(out: &mut impl Write, grid: &TextGrid) -> io::Result<()> {
    for (row, line) in grid.to_lines().iter().enumerate() {
        queue!(
            out,
            MoveTo(0, row as u16),
            Print(line),
            Clear(ClearType::UntilNewLine)
        )?;
    }
    out.flush()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_writes_every_line() {
        let mut app = CalculatorApp::new();
        for key in "12+7".chars() {
            app.dispatch(tally::core::Event::from_char(key).unwrap());
        }
        let mut grid = TextGrid::new(40, 16);
        render(&app, &mut grid);

        let mut buf = Vec::new();
        draw(&mut buf, &grid).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("12+7"));
        assert!(text.contains("Keypad"));
        // One cursor move per row: ESC [ row ; col H
        assert!(text.contains("\u{1b}[16;1H"));
    }

    #[test]
    fn test_inactive_guard_restore_is_noop() {
        let mut guard = TerminalGuard { active: false };
        assert!(guard.restore().is_ok());
        assert!(guard.restore().is_ok());
        assert!(!guard.active);
    }

    #[test]
    fn test_draw_empty_grid() {
        let mut buf = Vec::new();
        draw(&mut buf, &TextGrid::new(0, 0)).unwrap();
        assert!(buf.is_empty());
    }
}
