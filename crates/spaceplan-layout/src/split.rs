//! Proportional subdivision of a rectangle along one axis.

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;
use spaceplan_core::BoundaryRect;
use tracing::{trace, warn};

/// Direction along which a rectangle is subdivided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitAxis {
    /// Vertical dividing lines: parts are placed left to right
    Vertical,
    /// Horizontal dividing lines: parts are stacked top to bottom
    Horizontal,
}

impl SplitAxis {
    /// Axis for a node's angle: within `tolerance` of π/2 is vertical,
    /// anything else is horizontal.
    pub fn for_angle(angle: f64, tolerance: f64) -> Self {
        if (angle - FRAC_PI_2).abs() <= tolerance {
            SplitAxis::Vertical
        } else {
            SplitAxis::Horizontal
        }
    }

    /// The other axis.
    pub fn flip(self) -> Self {
        match self {
            SplitAxis::Vertical => SplitAxis::Horizontal,
            SplitAxis::Horizontal => SplitAxis::Vertical,
        }
    }

    /// Unit vector along which parts are laid out.
    fn main(self) -> DVec2 {
        match self {
            SplitAxis::Vertical => DVec2::X,
            SplitAxis::Horizontal => DVec2::Y,
        }
    }

    /// Unit vector of the dimension every part keeps in full.
    fn cross(self) -> DVec2 {
        self.flip().main()
    }
}

/// Area weights usable as split ratios.
///
/// Negative or non-finite areas count as zero. When nothing is left to
/// divide by, every part gets an equal share.
pub fn split_weights(areas: &[f64]) -> Vec<f64> {
    let weights: Vec<f64> = areas
        .iter()
        .map(|&a| if a.is_finite() && a > 0.0 { a } else { 0.0 })
        .collect();
    let total: f64 = weights.iter().sum();

    if total > 0.0 && total.is_finite() {
        weights
    } else {
        if !areas.is_empty() {
            warn!(parts = areas.len(), "degenerate sibling areas, splitting equally");
        }
        vec![1.0; areas.len()]
    }
}

/// Divide `rect` along `axis` into parts proportional to `areas`.
///
/// Parts are returned in the given order with cumulative offsets. The
/// last part ends exactly on the far edge of `rect`, so the parts tile it.
pub fn split_rect(rect: BoundaryRect, axis: SplitAxis, areas: &[f64]) -> Vec<BoundaryRect> {
    let weights = split_weights(areas);
    let total: f64 = weights.iter().sum();

    let main = axis.main();
    let origin = rect.position();
    let size = rect.size();
    let extent = size.dot(main);
    let kept = size * axis.cross();

    let mut parts = Vec::with_capacity(weights.len());
    let mut consumed = 0.0;
    let mut start = 0.0;

    for (index, weight) in weights.iter().enumerate() {
        consumed += weight;
        let end = if index + 1 == weights.len() {
            extent
        } else {
            extent * consumed / total
        };
        parts.push(BoundaryRect::from_vecs(origin + main * start, kept + main * (end - start)));
        start = end;
    }

    trace!(?axis, parts = parts.len(), "split rectangle");
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_for_angle() {
        assert_eq!(SplitAxis::for_angle(1.5708, 0.1), SplitAxis::Vertical);
        assert_eq!(SplitAxis::for_angle(FRAC_PI_2 + 0.09, 0.1), SplitAxis::Vertical);
        assert_eq!(SplitAxis::for_angle(FRAC_PI_2 - 0.2, 0.1), SplitAxis::Horizontal);
        assert_eq!(SplitAxis::for_angle(0.0, 0.1), SplitAxis::Horizontal);
        assert_eq!(SplitAxis::for_angle(std::f64::consts::PI, 0.1), SplitAxis::Horizontal);
    }

    #[test]
    fn test_vertical_split() {
        let parts = split_rect(
            BoundaryRect::new(0.0, 0.0, 100.0, 50.0),
            SplitAxis::Vertical,
            &[600.0, 400.0],
        );
        assert_eq!(parts[0], BoundaryRect::new(0.0, 0.0, 60.0, 50.0));
        assert_eq!(parts[1], BoundaryRect::new(60.0, 0.0, 40.0, 50.0));
    }

    #[test]
    fn test_horizontal_split_with_offset() {
        let parts = split_rect(
            BoundaryRect::new(10.0, 20.0, 40.0, 100.0),
            SplitAxis::Horizontal,
            &[1.0, 1.0, 2.0],
        );
        assert_eq!(parts.len(), 3);
        assert!((parts[0].y - 20.0).abs() < 0.001);
        assert!((parts[1].y - 45.0).abs() < 0.001);
        assert!((parts[2].y - 70.0).abs() < 0.001);
        assert!((parts[2].bottom() - 120.0).abs() < 1e-9);
        assert!(parts.iter().all(|p| p.x == 10.0 && p.width == 40.0));
    }

    #[test]
    fn test_zero_areas_split_equally() {
        let parts = split_rect(
            BoundaryRect::new(0.0, 0.0, 90.0, 10.0),
            SplitAxis::Vertical,
            &[0.0, 0.0, 0.0],
        );
        for (i, part) in parts.iter().enumerate() {
            assert!((part.x - 30.0 * i as f64).abs() < 0.001);
            assert!((part.width - 30.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_bad_weights_count_as_zero() {
        assert_eq!(split_weights(&[-5.0, f64::NAN, 2.0]), vec![0.0, 0.0, 2.0]);
        assert_eq!(split_weights(&[f64::INFINITY, 0.0]), vec![1.0, 1.0]);
        assert!(split_weights(&[]).is_empty());
    }
}
