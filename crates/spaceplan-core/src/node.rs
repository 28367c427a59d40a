//! Space program data structures.
//!
//! [`SpaceNode`] is the canonical owned tree produced by normalization.
//! [`SpaceProgram`] is a flat, id-indexed view of the same tree that the
//! layout engine walks; because children are stored as ids it can also
//! describe shared or cyclic structures, which the engine rejects.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node of a normalized space program.
///
/// Sibling order is significant: it is the left-to-right or top-to-bottom
/// placement order during layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceNode {
    pub name: String,
    /// Room type reported by the generator (`type` / `roomType`)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Target area; only ratios among siblings are used
    pub area: f64,
    /// Split orientation in radians
    pub angle: f64,
    /// Terminal room; always has no children
    pub is_final: bool,
    #[serde(default)]
    pub children: Vec<SpaceNode>,
}

impl SpaceNode {
    /// Create a final (room) node.
    pub fn room(name: impl Into<String>, area: f64) -> Self {
        Self {
            name: name.into(),
            kind: None,
            area,
            angle: 0.0,
            is_final: true,
            children: Vec::new(),
        }
    }

    /// Create an internal node that splits its region among `children`.
    pub fn split(name: impl Into<String>, area: f64, angle: f64, children: Vec<SpaceNode>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            area,
            angle,
            is_final: false,
            children,
        }
    }

    /// Set the room type.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// True when the node has no children, whatever its final flag says.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SpaceNode::node_count).sum::<usize>()
    }

    /// Number of levels in this subtree (a lone node has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(SpaceNode::depth).max().unwrap_or(0)
    }
}

/// Identifier of a node inside a [`SpaceProgram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceNodeId(pub u64);

/// A node stored in a [`SpaceProgram`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramNode {
    pub id: SpaceNodeId,
    pub name: String,
    pub kind: Option<String>,
    pub area: f64,
    pub angle: f64,
    pub is_final: bool,
    /// Child node IDs in placement order
    pub children: Vec<SpaceNodeId>,
}

impl ProgramNode {
    /// Create a program node from the fields of a canonical node, without children.
    pub fn from_space_node(id: SpaceNodeId, node: &SpaceNode) -> Self {
        Self {
            id,
            name: node.name.clone(),
            kind: node.kind.clone(),
            area: node.area,
            angle: node.angle,
            is_final: node.is_final,
            children: Vec::new(),
        }
    }
}

/// Flat, id-indexed space program.
#[derive(Debug, Clone, Default)]
pub struct SpaceProgram {
    /// All nodes, in insertion order
    nodes: IndexMap<SpaceNodeId, ProgramNode>,
    root: Option<SpaceNodeId>,
    /// Counter for generating unique IDs
    next_id: u64,
}

impl SpaceProgram {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a program from a canonical tree.
    ///
    /// Ids are assigned in pre-order, so `SpaceNodeId(n)` is the n-th node
    /// visited by a depth-first walk with children in their given order.
    pub fn from_node(root: &SpaceNode) -> Self {
        let mut program = Self::new();
        let root_id = program.set_root(root);
        program.push_children(root_id, root);
        program
    }

    fn push_children(&mut self, parent: SpaceNodeId, node: &SpaceNode) {
        for child in &node.children {
            let child_id = self.add_child(parent, child);
            self.push_children(child_id, child);
        }
    }

    /// Generate a new unique node ID.
    pub fn next_id(&mut self) -> SpaceNodeId {
        let id = SpaceNodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert the root node (its children are not copied).
    pub fn set_root(&mut self, node: &SpaceNode) -> SpaceNodeId {
        let id = self.next_id();
        self.nodes.insert(id, ProgramNode::from_space_node(id, node));
        self.root = Some(id);
        id
    }

    /// Insert `node` (without its children) as the last child of `parent`.
    pub fn add_child(&mut self, parent: SpaceNodeId, node: &SpaceNode) -> SpaceNodeId {
        let id = self.next_id();
        self.nodes.insert(id, ProgramNode::from_space_node(id, node));
        self.link_child(parent, id);
        id
    }

    /// Append an existing node to `parent`'s children.
    ///
    /// Nothing prevents linking an ancestor here; layout walks detect the
    /// resulting cycle.
    pub fn link_child(&mut self, parent: SpaceNodeId, child: SpaceNodeId) {
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.push(child);
        }
    }

    /// Get a node by ID.
    pub fn get(&self, id: SpaceNodeId) -> Option<&ProgramNode> {
        self.nodes.get(&id)
    }

    pub fn root(&self) -> Option<SpaceNodeId> {
        self.root
    }

    /// Iterate over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ProgramNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl From<&SpaceNode> for SpaceProgram {
    fn from(root: &SpaceNode) -> Self {
        Self::from_node(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SpaceNode {
        SpaceNode::split(
            "root",
            1000.0,
            0.0,
            vec![
                SpaceNode::split(
                    "wing",
                    600.0,
                    1.5708,
                    vec![SpaceNode::room("a", 300.0), SpaceNode::room("b", 300.0)],
                ),
                SpaceNode::room("c", 400.0),
            ],
        )
    }

    #[test]
    fn test_node_counts() {
        let tree = sample();
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.depth(), 3);
        assert!(!tree.is_leaf());
        assert!(tree.children[1].is_leaf());
    }

    #[test]
    fn test_program_ids_are_preorder() {
        let program = SpaceProgram::from_node(&sample());
        let names: Vec<_> = program.nodes().map(|n| (n.id.0, n.name.as_str())).collect();
        assert_eq!(names, vec![(0, "root"), (1, "wing"), (2, "a"), (3, "b"), (4, "c")]);

        let root = program.root().unwrap();
        assert_eq!(program.get(root).unwrap().children, vec![SpaceNodeId(1), SpaceNodeId(4)]);
    }

    #[test]
    fn test_link_child_allows_cycles() {
        let mut program = SpaceProgram::from_node(&sample());
        let root = program.root().unwrap();
        program.link_child(SpaceNodeId(1), root);
        let wing = program.get(SpaceNodeId(1)).unwrap();
        assert_eq!(wing.children, vec![SpaceNodeId(2), SpaceNodeId(3), root]);
    }

    #[test]
    fn test_serde_field_names() {
        let node = SpaceNode::room("kitchen", 12.5).with_kind("kitchen");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["isFinal"], serde_json::json!(true));
        assert_eq!(value["type"], serde_json::json!("kitchen"));
    }
}
