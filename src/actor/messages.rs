//! Message types exchanged between the actor threads and the picker loop.

use crate::wheel::PointerEvent;

/// Stage of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Button pressed.
    Down,
    /// Moved while pressed.
    Move,
    /// Button released.
    Up,
}

/// Pixel footprint of one terminal cell.
///
/// Pointer positions are reported at the centre of the cell they hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellScale {
    /// Pixels per column.
    pub px_per_col: i32,
    /// Pixels per row.
    pub px_per_row: i32,
}

impl CellScale {
    /// Create a scale; both dimensions are raised to at least 1.
    pub fn new(px_per_col: i32, px_per_row: i32) -> Self {
        Self {
            px_per_col: px_per_col.max(1),
            px_per_row: px_per_row.max(1),
        }
    }

    /// Pixel x of the centre of `column`.
    #[allow(clippy::cast_precision_loss)]
    pub fn x(&self, column: u16) -> f32 {
        (i32::from(column) * self.px_per_col + self.px_per_col / 2) as f32
    }

    /// Pixel y of the centre of `row`.
    #[allow(clippy::cast_precision_loss)]
    pub fn y(&self, row: u16) -> f32 {
        (i32::from(row) * self.px_per_row + self.px_per_row / 2) as f32
    }

    /// Pointer event for the mouse at a cell.
    pub fn pointer(&self, column: u16, row: u16, time_ms: u64) -> PointerEvent {
        PointerEvent::new(MOUSE_POINTER_ID, self.x(column), self.y(row), time_ms)
    }
}

/// Pointer id used for the terminal mouse, the only pointer a terminal has.
pub const MOUSE_POINTER_ID: u32 = 0;

/// Events from the input thread.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Mouse press, drag or release, in pixel space.
    Pointer(PointerPhase, PointerEvent),

    /// Mouse wheel over the pixel column `x`; `delta` is in items.
    Scroll {
        /// Horizontal pixel position.
        x: f32,
        /// Items to move (positive = towards later items).
        delta: isize,
    },

    /// Step the focused wheel by `delta` items.
    Step(isize),

    /// Move keyboard focus `delta` wheels to the right.
    Focus(isize),

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// The user asked to leave.
    Quit,

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}
