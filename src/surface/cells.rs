//! Cell surface: Rasterises wheel draw calls onto a terminal cell grid.
//!
//! Wheels think in pixels. A terminal only has cells, so the surface maps
//! pixel space onto the grid with a fixed number of pixels per column and
//! per row. Terminals cannot scale fonts: text whose size reaches
//! `bold_threshold` is emitted bold instead, which keeps the selected row
//! visually distinct.

use super::{Bounds, DrawSurface, Point, Rgb, TextStyle};
use bitflags::bitflags;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// This cell is covered by the wide grapheme to its left
        const WIDE_CONTINUATION = 0b1000_0000;
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Grapheme shown in this cell (empty for wide continuations).
    pub symbol: String,
    /// Foreground color.
    pub fg: Rgb,
    /// Background color.
    pub bg: Rgb,
    /// Style modifiers.
    pub modifiers: Modifiers,
}

impl Cell {
    /// A blank cell with the given background.
    pub fn blank(bg: Rgb) -> Self {
        Self {
            symbol: " ".to_string(),
            fg: Rgb::WHITE,
            bg,
            modifiers: Modifiers::empty(),
        }
    }
}

/// A cell grid implementing [`DrawSurface`].
#[derive(Debug, Clone)]
pub struct CellSurface {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
    px_per_col: i32,
    px_per_row: i32,
    bold_threshold: f32,
}

impl CellSurface {
    /// Create a grid of `width` x `height` cells.
    ///
    /// `px_per_col` / `px_per_row` give the pixel footprint of one cell; both
    /// are raised to at least 1.
    pub fn new(width: u16, height: u16, px_per_col: i32, px_per_row: i32) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            cells: vec![Cell::blank(Rgb::BLACK); size],
            width,
            height,
            px_per_col: px_per_col.max(1),
            px_per_row: px_per_row.max(1),
            bold_threshold: f32::INFINITY,
        }
    }

    /// Emit text bold when its size is at least `size`.
    #[must_use]
    pub const fn with_bold_threshold(mut self, size: f32) -> Self {
        self.bold_threshold = size;
        self
    }

    /// Grid width in cells.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in cells.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Pixel-space size of the whole grid.
    pub fn pixel_bounds(&self) -> Bounds {
        Bounds::new(
            0,
            0,
            i32::from(self.width) * self.px_per_col,
            i32::from(self.height) * self.px_per_row,
        )
    }

    /// Resize the grid, clearing all content.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::blank(Rgb::BLACK); usize::from(width) * usize::from(height)];
    }

    /// Reset every cell to a blank with background `bg`.
    pub fn clear(&mut self, bg: Rgb) {
        self.cells.fill(Cell::blank(bg));
    }

    /// Get a cell, or `None` if out of bounds.
    pub fn get(&self, col: u16, row: u16) -> Option<&Cell> {
        self.index(i32::from(col), i32::from(row)).map(|i| &self.cells[i])
    }

    /// Row contents as a string, wide continuations skipped.
    pub fn row_text(&self, row: u16) -> String {
        (0..self.width)
            .filter_map(|col| self.get(col, row))
            .map(|c| c.symbol.as_str())
            .collect()
    }

    /// Iterate rows as cell slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width.max(1)))
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        let col = u16::try_from(col).ok()?;
        let row = u16::try_from(row).ok()?;
        (col < self.width && row < self.height)
            .then(|| usize::from(row) * usize::from(self.width) + usize::from(col))
    }
}

impl DrawSurface for CellSurface {
    fn fill_rect(&mut self, bounds: Bounds, color: Rgb) {
        if bounds.is_empty() {
            return;
        }
        let first_col = bounds.x.div_euclid(self.px_per_col);
        let last_col = (bounds.right() - 1).div_euclid(self.px_per_col);
        let first_row = bounds.y.div_euclid(self.px_per_row);
        let last_row = (bounds.bottom() - 1).div_euclid(self.px_per_row);

        for row in first_row..=last_row {
            for col in first_col..=last_col {
                if let Some(i) = self.index(col, row) {
                    self.cells[i] = Cell::blank(color);
                }
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn draw_text(&mut self, text: &str, position: Point, style: TextStyle) {
        let row = position.y.div_euclid(self.px_per_row);
        if row < 0 || row >= i32::from(self.height) {
            return;
        }

        let anchor = position.x.div_euclid(self.px_per_col);
        let text_width = text.width() as i32;
        let mut col = if style.centered {
            anchor - text_width / 2
        } else {
            anchor
        };

        let modifiers = if style.size >= self.bold_threshold {
            Modifiers::BOLD
        } else {
            Modifiers::empty()
        };

        for grapheme in text.graphemes(true) {
            let w = grapheme.width() as i32;
            if w == 0 {
                continue;
            }
            // Wide graphemes straddling the grid edge are dropped whole.
            if let (Some(i), Some(_)) = (self.index(col, row), self.index(col + w - 1, row)) {
                let cell = &mut self.cells[i];
                cell.symbol = grapheme.to_string();
                cell.fg = style.color;
                cell.modifiers = modifiers;
                for extra in 1..w {
                    if let Some(j) = self.index(col + extra, row) {
                        let cont = &mut self.cells[j];
                        cont.symbol.clear();
                        cont.modifiers = Modifiers::WIDE_CONTINUATION;
                    }
                }
            }
            col += w;
        }
    }
}
