//! Axis-aligned rectangles over a planar coordinate type.

use crate::PlanarPosition;

/// An axis-aligned rectangle anchored at its minimum (bottom-left) corner.
///
/// Degenerate (zero-area) rectangles are valid values; `width` and `height`
/// are never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<C: PlanarPosition> {
    min: C,
    width: f64,
    height: f64,
}

impl<C: PlanarPosition> Rect<C> {
    /// Create a rectangle from its minimum corner and extents.
    pub fn new(min: C, width: f64, height: f64) -> Self {
        Self {
            min,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Create a rectangle spanning two opposite corners.
    pub fn from_corners(min: C, max: C) -> Self {
        Self::new(min, max.x() - min.x(), max.y() - min.y())
    }

    /// The minimum (bottom-left) corner.
    pub fn min(&self) -> C {
        self.min
    }

    /// Extent along the horizontal axis.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Extent along the vertical axis.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The top-left corner.
    pub fn corner_tl(&self) -> C {
        self.min.offset(0.0, self.height)
    }

    /// The top-right corner.
    pub fn corner_tr(&self) -> C {
        self.min.offset(self.width, self.height)
    }

    /// The bottom-right corner.
    pub fn corner_br(&self) -> C {
        self.min.offset(self.width, 0.0)
    }

    /// The enclosed area, `width × height`.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether the point lies within the rectangle, inclusive on all edges.
    pub fn contains(&self, point: &C) -> bool {
        point.x() >= self.min.x()
            && point.x() <= self.min.x() + self.width
            && point.y() >= self.min.y()
            && point.y() <= self.min.y() + self.height
    }

    /// The rectangle covering the overlap of `self` and `other`; zero-area
    /// if they are disjoint.
    pub fn intersection(&self, other: &Rect<C>) -> Rect<C> {
        let x0 = self.min.x().max(other.min.x());
        let y0 = self.min.y().max(other.min.y());
        let x1 = (self.min.x() + self.width).min(other.min.x() + other.width);
        let y1 = (self.min.y() + self.height).min(other.min.y() + other.height);

        let min = self.min.offset(x0 - self.min.x(), y0 - self.min.y());
        Rect::new(min, x1 - x0, y1 - y0)
    }

    /// The smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Rect<C>) -> Rect<C> {
        let x0 = self.min.x().min(other.min.x());
        let y0 = self.min.y().min(other.min.y());
        let x1 = (self.min.x() + self.width).max(other.min.x() + other.width);
        let y1 = (self.min.y() + self.height).max(other.min.y() + other.height);

        let min = self.min.offset(x0 - self.min.x(), y0 - self.min.y());
        Rect::new(min, x1 - x0, y1 - y0)
    }
}
