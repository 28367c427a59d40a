//! Axis-aligned rectangles used as layout regions.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle that a space program is laid out into.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundaryRect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundaryRect {
    /// Create a rectangle with position and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from position and size vectors.
    pub fn from_vecs(position: DVec2, size: DVec2) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.x,
            height: size.y,
        }
    }

    /// Get position as a vector.
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Get size as a vector.
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Overlapping region with another rectangle.
    ///
    /// Rectangles that only share an edge do not intersect.
    pub fn intersect(&self, other: &BoundaryRect) -> Option<BoundaryRect> {
        let low = self.position().max(other.position());
        let high = (self.position() + self.size()).min(other.position() + other.size());
        low.cmplt(high).all().then(|| BoundaryRect::from_vecs(low, high - low))
    }
}
