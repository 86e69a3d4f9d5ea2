//! Character grid the calculator screen is drawn into.
//!
//! Frames are composed here and then flushed to the terminal line by line,
//! which keeps rendering testable without a live terminal.

/// Rectangular area on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left column
    pub x: u16,
    /// Top row
    pub y: u16,
    /// Width in cells
    pub width: u16,
    /// Height in cells
    pub height: u16,
}

impl Rect {
    /// Creates a new rectangle
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Area inside a one-cell border
    #[must_use]
    pub const fn inner(self) -> Self {
        Self {
            x: self.x + 1,
            y: self.y + 1,
            width: self.width.saturating_sub(2),
            height: self.height.saturating_sub(2),
        }
    }

    /// Returns true if the cell lies inside the rectangle
    #[must_use]
    pub const fn contains(self, x: u16, y: u16) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

/// Simple text grid.
///
/// Stores characters in a flat vector with row-major ordering.
#[derive(Debug, Clone)]
pub struct TextGrid {
    cells: Vec<char>,
    width: u16,
    height: u16,
}

impl TextGrid {
    /// Create a new text grid filled with spaces.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![' '; size],
            width,
            height,
        }
    }

    /// Get the width of the grid.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the grid.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Whole grid as a rectangle
    #[must_use]
    pub const fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get the character at (x, y).
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set the character at (x, y). Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: u16, y: u16, ch: char) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = ch;
        }
    }

    /// Clear the grid (fill with spaces).
    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    /// Resize the grid. Content is cleared.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let size = (width as usize) * (height as usize);
        self.cells.clear();
        self.cells.resize(size, ' ');
    }

    /// Write a string starting at (x, y), truncated at the grid edge.
    pub fn write_str(&mut self, x: u16, y: u16, s: &str) {
        let mut pos_x = x;
        for ch in s.chars() {
            if pos_x >= self.width {
                break;
            }
            self.set(pos_x, y, ch);
            pos_x += 1;
        }
    }

    /// Write a string clipped to `max_width` cells
    pub fn write_clipped(&mut self, x: u16, y: u16, s: &str, max_width: u16) {
        let clipped: String = s.chars().take(max_width as usize).collect();
        self.write_str(x, y, &clipped);
    }

    /// Draw a single-line box around `area` with an optional title
    pub fn draw_box(&mut self, area: Rect, title: &str) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        for x in area.x + 1..right {
            self.set(x, area.y, '─');
            self.set(x, bottom, '─');
        }
        for y in area.y + 1..bottom {
            self.set(area.x, y, '│');
            self.set(right, y, '│');
        }
        self.set(area.x, area.y, '┌');
        self.set(right, area.y, '┐');
        self.set(area.x, bottom, '└');
        self.set(right, bottom, '┘');

        if !title.is_empty() {
            self.write_clipped(area.x + 1, area.y, title, area.width.saturating_sub(2));
        }
    }

    /// Convert the grid to lines with trailing spaces trimmed.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.height as usize);
        for y in 0..self.height {
            let start = (y as usize) * (self.width as usize);
            let end = start + (self.width as usize);
            let line: String = self.cells[start..end].iter().collect();
            lines.push(line.trim_end().to_string());
        }
        lines
    }

    /// Returns true if any line contains `needle`
    #[must_use]
    pub fn contains_text(&self, needle: &str) -> bool {
        self.to_lines().iter().any(|line| line.contains(needle))
    }
}
