//! Area-balanced list bisection.
//!
//! Rooms are sorted by area, largest first, and the list is cut where the
//! two halves' area sums are closest. Each half receives a share of the
//! rectangle proportional to its area, and the halves are cut again along
//! the other axis until every group holds a single room.
//!
//! The work list shrinks by one group per step and every cut leaves two
//! non-empty halves, so the loop ends after `2n - 1` steps for `n` rooms
//! whatever the areas are.

use spaceplan_core::BoundaryRect;
use tracing::{trace, warn};

use crate::split::{split_rect, SplitAxis};

/// A group of consecutive rooms (in sorted order) and the region it fills.
struct Group {
    start: usize,
    end: usize,
    rect: BoundaryRect,
    axis: SplitAxis,
}

/// Place rooms with the given `areas` inside `boundary`.
///
/// Returns `(index into areas, rectangle)` pairs ordered by index. The
/// first cut places the halves side by side.
pub fn bisect(areas: &[f64], boundary: BoundaryRect) -> Vec<(usize, BoundaryRect)> {
    let weights: Vec<f64> = areas
        .iter()
        .map(|&a| if a.is_finite() && a > 0.0 { a } else { 0.0 })
        .collect();

    let mut order: Vec<usize> = (0..areas.len()).collect();
    order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));

    let mut placed = Vec::with_capacity(areas.len());
    let mut work = Vec::new();
    if !order.is_empty() {
        work.push(Group {
            start: 0,
            end: order.len(),
            rect: boundary,
            axis: SplitAxis::Vertical,
        });
    }

    while let Some(group) = work.pop() {
        let members = &order[group.start..group.end];
        if members.len() == 1 {
            placed.push((members[0], group.rect));
            continue;
        }

        let (cut, left_area, group_area) = best_cut(members.iter().map(|&i| weights[i]));
        let halves = if group_area > 0.0 {
            [left_area, group_area - left_area]
        } else {
            warn!(rooms = members.len(), "degenerate room areas, splitting by count");
            [cut as f64, (members.len() - cut) as f64]
        };
        trace!(rooms = members.len(), cut, axis = ?group.axis, "bisect");

        let parts = split_rect(group.rect, group.axis, &halves);
        let next_axis = group.axis.flip();
        work.push(Group {
            start: group.start + cut,
            end: group.end,
            rect: parts[1],
            axis: next_axis,
        });
        work.push(Group {
            start: group.start,
            end: group.start + cut,
            rect: parts[0],
            axis: next_axis,
        });
    }

    placed.sort_by_key(|&(index, _)| index);
    placed
}

/// Cut position in `1..len` minimising the difference between the two
/// halves' sums. Returns the cut, the left sum and the total.
fn best_cut(weights: impl Iterator<Item = f64> + Clone) -> (usize, f64, f64) {
    let total: f64 = weights.clone().sum();
    let len = weights.clone().count();

    let mut best = (1, 0.0);
    let mut best_diff = f64::INFINITY;
    let mut left = 0.0;

    for (index, weight) in weights.take(len - 1).enumerate() {
        left += weight;
        let diff = (left - (total - left)).abs();
        if diff < best_diff {
            best_diff = diff;
            best = (index + 1, left);
        }
    }

    (best.0, best.1, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_of(placed: &[(usize, BoundaryRect)], index: usize) -> BoundaryRect {
        placed.iter().find(|(i, _)| *i == index).unwrap().1
    }

    #[test]
    fn test_single_room_fills_boundary() {
        let boundary = BoundaryRect::new(200.0, 200.0, 600.0, 400.0);
        assert_eq!(bisect(&[42.0], boundary), vec![(0, boundary)]);
        assert!(bisect(&[], boundary).is_empty());
    }

    #[test]
    fn test_two_rooms_side_by_side() {
        let placed = bisect(&[100.0, 300.0], BoundaryRect::new(0.0, 0.0, 400.0, 100.0));
        // Sorted largest first, so the 300 room takes the left three quarters.
        assert_eq!(placed[1].1, BoundaryRect::new(0.0, 0.0, 300.0, 100.0));
        assert_eq!(placed[0].1, BoundaryRect::new(300.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_axis_alternates() {
        // Sorted: 40, 30, 20, 10. |40 - 60| = 20 beats |70 - 30| = 40,
        // so the first cut isolates 40.
        let placed = bisect(&[10.0, 20.0, 30.0, 40.0], BoundaryRect::new(0.0, 0.0, 100.0, 100.0));

        let big = rect_of(&placed, 3);
        assert!((big.width - 40.0).abs() < 0.001);
        assert!((big.height - 100.0).abs() < 0.001);

        // {30, 20, 10}: |30 - 30| = 0, so 30 sits above {20, 10}.
        let thirty = rect_of(&placed, 2);
        assert!((thirty.x - 40.0).abs() < 0.001);
        assert!((thirty.height - 50.0).abs() < 0.001);
        assert!((thirty.width - 60.0).abs() < 0.001);

        // {20, 10} is cut side by side again.
        let twenty = rect_of(&placed, 1);
        let ten = rect_of(&placed, 0);
        assert!((twenty.y - 50.0).abs() < 0.001);
        assert!((twenty.width - 40.0).abs() < 0.001);
        assert!((ten.x - 80.0).abs() < 0.001);
        assert!((ten.width - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_areas_split_by_count() {
        let placed = bisect(&[0.0, 0.0, 0.0, 0.0], BoundaryRect::new(0.0, 0.0, 100.0, 100.0));
        for (_, rect) in &placed {
            assert!((rect.area() - 2500.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_best_cut() {
        assert_eq!(best_cut([5.0, 3.0, 2.0].into_iter()), (1, 5.0, 10.0));
        assert_eq!(best_cut([1.0, 1.0].into_iter()), (1, 1.0, 2.0));
        assert_eq!(best_cut([0.0, 0.0, 0.0].into_iter()), (1, 0.0, 0.0));
    }
}
