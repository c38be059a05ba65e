//! `OutputBuffer`: Single-write frame encoder for a [`CellSurface`].

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};

use crate::surface::{CellSurface, Modifiers, Rgb};

/// Pre-allocated buffer for building one frame of escape sequences.
///
/// A whole frame is accumulated here, then flushed with a single write so the
/// terminal never shows a half-drawn wheel.
pub struct OutputBuffer {
    data: Vec<u8>,
}

/// Attributes last emitted, so unchanged runs add no escape sequences.
#[derive(Clone, Copy, PartialEq)]
struct Pen {
    fg: Rgb,
    bg: Rgb,
    modifiers: Modifiers,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (16KB).
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a full redraw of `surface`.
    ///
    /// # Errors
    ///
    /// Returns an error if a command fails to encode.
    pub fn encode(&mut self, surface: &CellSurface) -> io::Result<()> {
        let mut pen: Option<Pen> = None;
        for (y, row) in (0u16..).zip(surface.rows()) {
            queue!(self.data, MoveTo(0, y))?;
            for cell in row {
                if cell.modifiers.contains(Modifiers::WIDE_CONTINUATION) {
                    continue;
                }
                let next = Pen {
                    fg: cell.fg,
                    bg: cell.bg,
                    modifiers: cell.modifiers,
                };
                if pen != Some(next) {
                    self.set_pen(next)?;
                    pen = Some(next);
                }
                queue!(self.data, Print(&cell.symbol))?;
            }
        }
        queue!(self.data, SetAttribute(Attribute::Reset))
    }

    fn set_pen(&mut self, pen: Pen) -> io::Result<()> {
        queue!(
            self.data,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(pen.fg.into()),
            SetBackgroundColor(pen.bg.into())
        )?;
        if pen.modifiers.contains(Modifiers::BOLD) {
            queue!(self.data, SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
