//! Collection of the rooms ("final" nodes) of a program.
//!
//! Two modes exist because consumers disagree on what a room is:
//!
//! - **Strict** ([`final_nodes`]): only nodes flagged final.
//! - **Permissive** ([`leaf_nodes`]): nodes flagged final *or* without
//!   children, each with its rectangle computed top-down.
//!
//! They differ exactly on internal nodes left without children.

use spaceplan_core::{
    BoundaryRect, LayoutError, ProgramNode, RoomRecord, SpaceNode, SpaceNodeId, SpaceProgram,
};

use crate::guard::collect_nodes;
use crate::split::{split_rect, SplitAxis};

/// Nodes flagged final, in pre-order.
pub fn final_nodes(root: &SpaceNode) -> Vec<&SpaceNode> {
    fn walk<'a>(node: &'a SpaceNode, out: &mut Vec<&'a SpaceNode>) {
        if node.is_final {
            out.push(node);
        }
        for child in &node.children {
            walk(child, out);
        }
    }

    let mut out = Vec::new();
    walk(root, &mut out);
    out
}

/// Final nodes of an id-indexed program, rejecting cycles and excessive depth.
pub fn final_program_nodes(
    program: &SpaceProgram,
    max_depth: u32,
) -> Result<Vec<&ProgramNode>, LayoutError> {
    collect_nodes(program, max_depth, |node| node.is_final)
}

/// A leaf found by [`leaf_nodes`] and the rectangle it receives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedLeaf<'a> {
    /// Pre-order index of the node, matching [`SpaceProgram::from_node`] ids
    pub id: SpaceNodeId,
    pub node: &'a SpaceNode,
    pub bounds: BoundaryRect,
}

impl PlacedLeaf<'_> {
    /// Room record for this leaf.
    pub fn to_record(&self) -> RoomRecord {
        RoomRecord::from_space_node(self.id, self.node, self.bounds)
    }
}

/// Nodes that are final or have no children, in pre-order, each placed
/// by splitting `boundary` down the tree in proportion to sibling areas.
///
/// Unlike the tree partition, a node with a single child hands its whole
/// rectangle to that child instead of becoming a room itself.
pub fn leaf_nodes(
    root: &SpaceNode,
    boundary: BoundaryRect,
    vertical_tolerance: f64,
) -> Vec<PlacedLeaf<'_>> {
    struct Walk<'a> {
        tolerance: f64,
        next_id: u64,
        out: Vec<PlacedLeaf<'a>>,
    }

    impl<'a> Walk<'a> {
        fn visit(&mut self, node: &'a SpaceNode, rect: BoundaryRect) {
            let id = SpaceNodeId(self.next_id);
            self.next_id += 1;

            if node.is_final || node.is_leaf() {
                self.out.push(PlacedLeaf { id, node, bounds: rect });
                // Ids stay aligned with a full pre-order walk.
                self.next_id += node.children.iter().map(|c| c.node_count() as u64).sum::<u64>();
                return;
            }

            let areas: Vec<f64> = node.children.iter().map(|c| c.area).collect();
            let axis = SplitAxis::for_angle(node.angle, self.tolerance);
            for (child, part) in node.children.iter().zip(split_rect(rect, axis, &areas)) {
                self.visit(child, part);
            }
        }
    }

    let mut walk = Walk {
        tolerance: vertical_tolerance,
        next_id: 0,
        out: Vec::new(),
    };
    walk.visit(root, boundary);
    walk.out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program() -> SpaceNode {
        SpaceNode::split(
            "root",
            100.0,
            1.5708,
            vec![
                SpaceNode::split(
                    "living",
                    60.0,
                    0.0,
                    vec![SpaceNode::room("kitchen", 20.0), SpaceNode::room("lounge", 40.0)],
                ),
                SpaceNode::split("storage", 20.0, 0.0, Vec::new()),
                SpaceNode::split("private", 20.0, 0.0, vec![SpaceNode::room("bedroom", 20.0)]),
            ],
        )
    }

    #[test]
    fn test_strict_mode() {
        let root = program();
        let names: Vec<_> = final_nodes(&root).iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["kitchen", "lounge", "bedroom"]);
    }

    #[test]
    fn test_permissive_mode_includes_childless_internal_nodes() {
        let root = program();
        let leaves = leaf_nodes(&root, BoundaryRect::new(0.0, 0.0, 100.0, 60.0), 0.1);
        let names: Vec<_> = leaves.iter().map(|l| l.node.name.as_str()).collect();
        assert_eq!(names, vec!["kitchen", "lounge", "storage", "bedroom"]);

        let ids: Vec<_> = leaves.iter().map(|l| l.id.0).collect();
        assert_eq!(ids, vec![2, 3, 4, 6]);
    }

    #[test]
    fn test_permissive_rectangles() {
        let root = program();
        let leaves = leaf_nodes(&root, BoundaryRect::new(0.0, 0.0, 100.0, 60.0), 0.1);

        // living | storage | private side by side at 60 : 20 : 20
        let kitchen = leaves[0].bounds;
        assert!((kitchen.width - 60.0).abs() < 0.001);
        assert!((kitchen.height - 20.0).abs() < 0.001);
        let lounge = leaves[1].bounds;
        assert!((lounge.y - 20.0).abs() < 0.001);
        assert!((lounge.height - 40.0).abs() < 0.001);
        let storage = leaves[2].bounds;
        assert!((storage.x - 60.0).abs() < 0.001);
        // The single child takes all of its parent's rectangle.
        let bedroom = leaves[3].bounds;
        assert!((bedroom.x - 80.0).abs() < 0.001);
        assert!((bedroom.width - 20.0).abs() < 0.001);
        assert!((bedroom.height - 60.0).abs() < 0.001);
    }

    #[test]
    fn test_records_from_leaves() {
        let root = program();
        let leaves = leaf_nodes(&root, BoundaryRect::new(0.0, 0.0, 100.0, 60.0), 0.1);
        let storage = leaves[2].to_record();
        assert_eq!(storage.id, "room-4");
        assert!(!storage.is_final);
        assert_eq!(storage.kind, "storage");
    }

    #[test]
    fn test_program_final_nodes_match_tree() {
        let root = program();
        let arena = SpaceProgram::from_node(&root);
        let from_arena: Vec<_> = final_program_nodes(&arena, 64)
            .unwrap()
            .iter()
            .map(|n| n.name.clone())
            .collect();
        let from_tree: Vec<_> = final_nodes(&root).iter().map(|n| n.name.clone()).collect();
        assert_eq!(from_arena, from_tree);
    }

    #[test]
    fn test_lone_root() {
        let root = SpaceNode::room("studio", 30.0);
        let boundary = BoundaryRect::new(1.0, 1.0, 2.0, 2.0);
        let leaves = leaf_nodes(&root, boundary, 0.1);
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].bounds, boundary);
        assert_eq!(final_nodes(&root).len(), 1);
    }
}
