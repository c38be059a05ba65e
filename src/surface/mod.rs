//! Drawing surface: The narrow interface wheels render through.
//!
//! Wheels never own a canvas. Each frame they describe what to draw through
//! [`DrawSurface`]: one filled band behind the centre slot plus one text run
//! per visible slot. Hosts implement the trait for whatever backend they have:
//!
//! - [`CellSurface`]: rasterises onto a terminal cell grid
//! - [`RecordingSurface`]: records calls, used by tests and headless hosts
//!
//! [`Viewport`] translates and clips a surface so several wheels can share it
//! side by side.

mod bounds;
mod cells;
mod color;
mod recording;

pub use bounds::{Bounds, Point};
pub use cells::{Cell, CellSurface, Modifiers};
pub use color::Rgb;
pub use recording::{DrawCommand, RecordingSurface};

/// Visual attributes of one text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f32,
    /// Text color.
    pub color: Rgb,
    /// Whether `position` is the horizontal centre of the text (otherwise its left edge).
    pub centered: bool,
}

/// Primitive drawing operations consumed by wheel rendering.
///
/// `draw_text` positions are the vertical centre of the text's line.
pub trait DrawSurface {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, bounds: Bounds, color: Rgb);

    /// Draw a run of text.
    fn draw_text(&mut self, text: &str, position: Point, style: TextStyle);
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn fill_rect(&mut self, bounds: Bounds, color: Rgb) {
        (**self).fill_rect(bounds, color);
    }

    fn draw_text(&mut self, text: &str, position: Point, style: TextStyle) {
        (**self).draw_text(text, position, style);
    }
}

/// A translated, clipped view onto another surface.
///
/// Coordinates passed to a viewport are local: `(0, 0)` is the top-left of
/// `bounds` on the underlying surface. Rectangles are clipped to `bounds`;
/// text whose anchor lies outside is dropped.
pub struct Viewport<'a, S: DrawSurface + ?Sized> {
    inner: &'a mut S,
    bounds: Bounds,
}

impl<'a, S: DrawSurface + ?Sized> Viewport<'a, S> {
    /// Create a viewport onto `inner` covering `bounds`.
    pub fn new(inner: &'a mut S, bounds: Bounds) -> Self {
        Self { inner, bounds }
    }

    /// The area this viewport covers on the underlying surface.
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }
}

impl<S: DrawSurface + ?Sized> DrawSurface for Viewport<'_, S> {
    fn fill_rect(&mut self, bounds: Bounds, color: Rgb) {
        let moved = bounds.translate(self.bounds.x, self.bounds.y);
        let x = moved.x.max(self.bounds.x);
        let y = moved.y.max(self.bounds.y);
        let right = moved.right().min(self.bounds.right());
        let bottom = moved.bottom().min(self.bounds.bottom());
        let clipped = Bounds::new(x, y, right - x, bottom - y);
        if !clipped.is_empty() {
            self.inner.fill_rect(clipped, color);
        }
    }

    fn draw_text(&mut self, text: &str, position: Point, style: TextStyle) {
        let x = position.x + self.bounds.x;
        let y = position.y + self.bounds.y;
        if self.bounds.contains(x, y) {
            self.inner.draw_text(text, Point::new(x, y), style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_translates_and_clips() {
        let mut rec = RecordingSurface::new();
        {
            let mut view = Viewport::new(&mut rec, Bounds::new(100, 0, 50, 40));
            view.fill_rect(Bounds::new(-10, -5, 80, 10), Rgb::BAND);
            let style = TextStyle {
                size: 10.0,
                color: Rgb::INK,
                centered: true,
            };
            view.draw_text("in", Point::new(25, 20), style);
            view.draw_text("out", Point::new(25, -1), style);
        }
        assert_eq!(
            rec.commands(),
            &[
                DrawCommand::Rect {
                    bounds: Bounds::new(100, 0, 50, 5),
                    color: Rgb::BAND,
                },
                DrawCommand::Text {
                    text: "in".to_string(),
                    position: Point::new(125, 20),
                    style: TextStyle {
                        size: 10.0,
                        color: Rgb::INK,
                        centered: true,
                    },
                },
            ]
        );
    }
}
