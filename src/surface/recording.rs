//! Recording surface: Captures draw calls instead of rasterising them.

use super::{Bounds, DrawSurface, Point, Rgb, TextStyle};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A filled rectangle.
    Rect {
        /// Area filled.
        bounds: Bounds,
        /// Fill color.
        color: Rgb,
    },
    /// A text run.
    Text {
        /// The text drawn.
        text: String,
        /// Anchor position.
        position: Point,
        /// Size, color and alignment.
        style: TextStyle,
    },
}

/// A [`DrawSurface`] that keeps every call in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text runs only, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, TextStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text {
                text,
                position,
                style,
            } => Some((text.as_str(), *position, *style)),
            DrawCommand::Rect { .. } => None,
        })
    }

    /// Forget everything recorded.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn fill_rect(&mut self, bounds: Bounds, color: Rgb) {
        self.commands.push(DrawCommand::Rect { bounds, color });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            style,
        });
    }
}
