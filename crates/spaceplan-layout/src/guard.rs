//! Cycle and depth protection for walks over a [`SpaceProgram`].

use std::collections::HashSet;

use smallvec::SmallVec;
use spaceplan_core::{HierarchyDefect, LayoutError, ProgramNode, SpaceNodeId, SpaceProgram};

/// Tracks the current path and every visited node during a depth-first walk.
pub(crate) struct WalkGuard<'a> {
    program: &'a SpaceProgram,
    max_depth: u32,
    /// Ancestors of the node being visited, root first
    path: SmallVec<[SpaceNodeId; 16]>,
    visited: HashSet<SpaceNodeId>,
}

impl<'a> WalkGuard<'a> {
    pub(crate) fn new(program: &'a SpaceProgram, max_depth: u32) -> Self {
        Self {
            program,
            max_depth,
            path: SmallVec::new(),
            visited: HashSet::with_capacity(program.len()),
        }
    }

    /// The root node, or `MissingNode` for an empty program.
    pub(crate) fn root(&self) -> Result<SpaceNodeId, LayoutError> {
        self.program
            .root()
            .ok_or_else(|| LayoutError::malformed("<root>", HierarchyDefect::MissingNode))
    }

    /// Enter `id` below the current path.
    ///
    /// Fails when the node does not exist, is already on the path, was
    /// reached before through another parent, or sits deeper than allowed.
    pub(crate) fn enter(&mut self, id: SpaceNodeId) -> Result<&'a ProgramNode, LayoutError> {
        let program = self.program;
        let node = program.get(id).ok_or_else(|| {
            LayoutError::malformed(format!("#{}", id.0), HierarchyDefect::MissingNode)
        })?;

        if self.path.contains(&id) {
            return Err(LayoutError::malformed(&node.name, HierarchyDefect::Cycle));
        }
        if !self.visited.insert(id) {
            return Err(LayoutError::malformed(&node.name, HierarchyDefect::SharedNode));
        }
        if self.path.len() as u32 >= self.max_depth {
            return Err(LayoutError::malformed(
                &node.name,
                HierarchyDefect::DepthExceeded { limit: self.max_depth },
            ));
        }

        self.path.push(id);
        Ok(node)
    }

    /// Leave the node entered last.
    pub(crate) fn exit(&mut self) {
        self.path.pop();
    }
}

/// Collect the nodes of `program` accepted by `keep`, in pre-order.
pub(crate) fn collect_nodes<'a>(
    program: &'a SpaceProgram,
    max_depth: u32,
    keep: impl Fn(&ProgramNode) -> bool,
) -> Result<Vec<&'a ProgramNode>, LayoutError> {
    fn walk<'a>(
        guard: &mut WalkGuard<'a>,
        id: SpaceNodeId,
        keep: &dyn Fn(&ProgramNode) -> bool,
        out: &mut Vec<&'a ProgramNode>,
    ) -> Result<(), LayoutError> {
        let node = guard.enter(id)?;
        if keep(node) {
            out.push(node);
        }
        for &child in &node.children {
            walk(guard, child, keep, out)?;
        }
        guard.exit();
        Ok(())
    }

    let mut guard = WalkGuard::new(program, max_depth);
    let root = guard.root()?;
    let mut out = Vec::new();
    walk(&mut guard, root, &keep, &mut out)?;
    Ok(out)
}
