//! Box model primitives.
//!
//! ```text
//! ┌───────────────────────────────────┐
//! │            margin-top             │
//! │   ┌───────────────────────────┐   │
//! │   │        padding-top        │   │
//! │ m │ p ┌───────────────────┐ p │ m │
//! │ a │ a │                   │ a │ a │
//! │ r │ d │      CONTENT      │ d │ r │
//! │ g │ d │                   │ d │ g │
//! │ i │ i └───────────────────┘ i │ i │
//! │ n │ n     padding-bottom    n │ n │
//! │   └───────────────────────────┘   │
//! │            margin-bottom          │
//! └───────────────────────────────────┘
//! ```
//!
//! An emitted `LayoutBox` is the padding box: backgrounds and borders are
//! painted over exactly that rectangle. Margins only separate boxes.

use serde::{Deserialize, Serialize};

/// A rectangle positioned on the canvas, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its origin and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Right edge (`x + width`).
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Whether two rectangles share any area.
    ///
    /// Rectangles that only touch along an edge do not intersect, and a
    /// rectangle with zero width or height never intersects anything.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Shrink the rectangle by the given edges.
    ///
    /// The resulting width and height never go below zero.
    #[must_use]
    pub fn inset(&self, edges: &EdgeSizes) -> Self {
        Self {
            x: self.x + edges.left,
            y: self.y + edges.top,
            width: (self.width - edges.horizontal()).max(0.0),
            height: (self.height - edges.vertical()).max(0.0),
        }
    }
}

/// Edge sizes for padding or margin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: f32,
    /// Right edge size.
    pub right: f32,
    /// Bottom edge size.
    pub bottom: f32,
    /// Left edge size.
    pub left: f32,
}

impl EdgeSizes {
    /// No spacing on any side.
    pub const ZERO: Self = Self::all(0.0);

    /// Explicit top, right, bottom, left (CSS shorthand order).
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same size on all four sides.
    #[must_use]
    pub const fn all(size: f32) -> Self {
        Self::new(size, size, size, size)
    }

    /// `vertical` on top and bottom, `horizontal` on left and right.
    #[must_use]
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// `left + right`.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// `top + bottom`.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Replace negative or non-finite sides with zero.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self::new(
            non_negative(self.top),
            non_negative(self.right),
            non_negative(self.bottom),
            non_negative(self.left),
        )
    }
}

/// Clamp a length to `[0, ∞)`, mapping NaN and infinities to zero.
pub(crate) fn non_negative(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_sums() {
        let edges = EdgeSizes::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(edges.horizontal(), 6.0);
        assert_eq!(edges.vertical(), 4.0);
        assert_eq!(EdgeSizes::symmetric(20.0, 10.0).vertical(), 40.0);
    }

    #[test]
    fn test_sanitized_drops_negative_and_nan() {
        let edges = EdgeSizes::new(-5.0, f32::NAN, 3.0, f32::INFINITY).sanitized();
        assert_eq!(edges, EdgeSizes::new(0.0, 0.0, 3.0, 0.0));
    }

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 40.0);
        let b = Rect::new(0.0, 40.0, 100.0, 60.0);
        assert!(!a.intersects(&b));
        let c = Rect::new(50.0, 39.0, 10.0, 10.0);
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_inset_never_goes_negative() {
        let r = Rect::new(10.0, 10.0, 30.0, 30.0).inset(&EdgeSizes::all(20.0));
        assert_eq!(r, Rect::new(30.0, 30.0, 0.0, 0.0));
    }
}
