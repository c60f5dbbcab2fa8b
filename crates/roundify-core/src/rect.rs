use std::fmt;

/// A rectangle in physical screen pixels, e.g. the full bounds of a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from Win32-style edges (`right`/`bottom` exclusive).
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at ({}, {})", self.width, self.height, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_edges_computes_size() {
        // Act
        let rect = Rect::from_edges(-1920, 0, 0, 1080);

        // Assert
        assert_eq!(rect, Rect::new(-1920, 0, 1920, 1080));
        assert_eq!(rect.right(), 0);
        assert_eq!(rect.bottom(), 1080);
    }

    #[test]
    fn zero_sized_rect_is_empty() {
        assert!(Rect::new(0, 0, 0, 1080).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn display_shows_size_then_origin() {
        assert_eq!(Rect::new(1920, 0, 2560, 1440).to_string(), "2560x1440 at (1920, 0)");
    }
}
