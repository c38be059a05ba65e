//! Terminal guard: Raw mode, alternate screen and mouse capture for one session.

use std::io::{self, Stdout};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use tracing::debug;

use super::OutputBuffer;
use crate::error::Result;
use crate::surface::CellSurface;

/// Puts the terminal into picker mode and restores it when dropped.
pub struct Terminal {
    stdout: Stdout,
    output: OutputBuffer,
    width: u16,
    height: u16,
}

impl Terminal {
    /// Enter raw mode and the alternate screen, with mouse capture on.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn enter() -> Result<Self> {
        let (width, height) = terminal::size()?;
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        debug!(width, height, "terminal entered");

        Ok(Self {
            stdout,
            output: OutputBuffer::new(),
            width,
            height,
        })
    }

    /// Current size in cells.
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Record a new size reported by a resize event.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Draw `surface` over the whole screen in a single write.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn present(&mut self, surface: &CellSurface) -> Result<()> {
        self.output.clear();
        self.output.encode(surface)?;
        self.output.flush_to(&mut self.stdout)?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl std::fmt::Debug for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terminal")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
