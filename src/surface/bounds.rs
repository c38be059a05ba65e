//! Bounds: Pixel-space rectangle and point primitives for drawing.

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Horizontal position in pixels.
    pub x: i32,
    /// Vertical position in pixels.
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in pixel space defined by position and size.
///
/// Unlike terminal cells, pixel coordinates may be negative: slots that are
/// partially scrolled out of the viewport start above row 0.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    /// X coordinate of the top-left corner.
    pub x: i32,
    /// Y coordinate of the top-left corner.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Bounds {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Centre of the rectangle, rounded towards the top-left.
    #[inline]
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Move the rectangle by the given amount.
    #[inline]
    #[must_use]
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Split horizontally into `columns` equal-width pieces.
    ///
    /// The last column absorbs any remainder.
    pub fn columns(&self, columns: usize) -> Vec<Self> {
        if columns == 0 {
            return Vec::new();
        }
        let count = i32::try_from(columns).unwrap_or(i32::MAX);
        let width = self.width / count;
        (0..count)
            .map(|i| {
                let x = self.x + i * width;
                let w = if i == count - 1 {
                    self.right() - x
                } else {
                    width
                };
                Self::new(x, self.y, w, self.height)
            })
            .collect()
    }
}

impl std::fmt::Debug for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bounds({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains() {
        let b = Bounds::new(0, -10, 100, 20);
        assert!(b.contains(0, -10));
        assert!(b.contains(99, 9));
        assert!(!b.contains(100, 0));
        assert_eq!(b.center(), Point::new(50, 0));
    }

    #[test]
    fn test_bounds_columns() {
        let cols = Bounds::new(0, 0, 100, 50).columns(3);
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[0], Bounds::new(0, 0, 33, 50));
        assert_eq!(cols[2], Bounds::new(66, 0, 34, 50));
        assert!(Bounds::ZERO.columns(0).is_empty());
    }
}
