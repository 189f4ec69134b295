use crate::geometry::Rect;
use crate::style::{Rgb, TextAttrs};
use crate::text::char_width;

use super::Cell;

/// A rectangular grid of painted cells.
///
/// Widgets paint into a `Buffer`; frontends diff consecutive buffers and
/// write only the changed cells to the terminal.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Cells that differ from `other`, with their coordinates.
    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }

    /// Fill a rectangle with spaces in the given colors.
    pub fn fill_rect(&mut self, rect: Rect, fg: Rgb, bg: Rgb) {
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                self.set(x, y, Cell::new(' ').with_fg(fg).with_bg(bg));
            }
        }
    }

    /// Draw a single line of text starting at (`x`, `y`), clipped to
    /// `max_width` cells. Double-width glyphs get a continuation cell; a
    /// glyph that does not fit entirely is dropped.
    pub fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        max_width: u16,
        text: &str,
        fg: Rgb,
        bg: Rgb,
        attrs: TextAttrs,
    ) {
        let right = x.saturating_add(max_width);
        let mut cursor = x;
        for ch in text.chars() {
            let width = char_width(ch).max(1) as u16;
            if cursor + width > right {
                break;
            }
            self.set(cursor, y, Cell::new(ch).with_fg(fg).with_bg(bg).with_attrs(attrs));
            if width == 2 {
                let mut continuation = Cell::new(' ').with_fg(fg).with_bg(bg);
                continuation.wide_continuation = true;
                self.set(cursor + 1, y, continuation);
            }
            cursor += width;
        }
    }
}
