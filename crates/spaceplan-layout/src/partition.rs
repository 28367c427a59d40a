//! Tree-shape-preserving partition.
//!
//! Every internal node divides its rectangle among its children along the
//! axis given by its own angle. Ratios use the children's own areas, never
//! recomputed subtree totals, so inconsistent areas at different depths
//! are tolerated.

use spaceplan_core::{BoundaryRect, LayoutError, RoomRecord, SpaceNodeId, SpaceProgram};

use crate::guard::WalkGuard;
use crate::split::{split_rect, SplitAxis};

/// Partition `boundary` according to the shape of `program`.
///
/// A node with zero or one children becomes a room covering its whole
/// rectangle. Rooms are returned in pre-order.
pub fn partition(
    program: &SpaceProgram,
    boundary: BoundaryRect,
    max_depth: u32,
    vertical_tolerance: f64,
) -> Result<Vec<RoomRecord>, LayoutError> {
    let mut walk = PartitionWalk {
        guard: WalkGuard::new(program, max_depth),
        program,
        vertical_tolerance,
        rooms: Vec::new(),
    };
    let root = walk.guard.root()?;
    walk.visit(root, boundary)?;
    Ok(walk.rooms)
}

struct PartitionWalk<'a> {
    guard: WalkGuard<'a>,
    program: &'a SpaceProgram,
    vertical_tolerance: f64,
    rooms: Vec<RoomRecord>,
}

impl PartitionWalk<'_> {
    fn visit(&mut self, id: SpaceNodeId, rect: BoundaryRect) -> Result<(), LayoutError> {
        let node = self.guard.enter(id)?;

        if node.children.len() <= 1 {
            self.rooms.push(RoomRecord::from_node(node, rect));
        } else {
            let areas: Vec<f64> = node
                .children
                .iter()
                .map(|child| self.program.get(*child).map_or(0.0, |c| c.area))
                .collect();
            let axis = SplitAxis::for_angle(node.angle, self.vertical_tolerance);
            let parts = split_rect(rect, axis, &areas);

            for (&child, part) in node.children.iter().zip(parts) {
                self.visit(child, part)?;
            }
        }

        self.guard.exit();
        Ok(())
    }
}
