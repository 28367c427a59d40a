//! Strategy selection over a configured layout run.

use spaceplan_core::{BoundaryRect, LayoutError, ProgramNode, RoomRecord, SpaceNode, SpaceProgram};
use tracing::debug;

use crate::bisect::bisect;
use crate::config::{LayoutConfig, LayoutStrategy};
use crate::extract::final_program_nodes;
use crate::partition::partition;

/// Lays out space programs with the configured strategy.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out `program` inside `boundary`.
    ///
    /// Fails only when the program is structurally unusable: a cycle, a
    /// node reached twice, a missing node or nesting beyond `max_depth`.
    pub fn layout(
        &self,
        program: &SpaceProgram,
        boundary: BoundaryRect,
    ) -> Result<Vec<RoomRecord>, LayoutError> {
        let rooms = match self.config.strategy {
            LayoutStrategy::TreePartition => partition(
                program,
                boundary,
                self.config.max_depth,
                self.config.vertical_tolerance,
            )?,
            LayoutStrategy::Bisect => {
                let finals = final_program_nodes(program, self.config.max_depth)?;
                self.bisect_rooms(&finals, boundary)
            }
        };

        debug!(
            strategy = self.config.strategy.name(),
            rooms = rooms.len(),
            nodes = program.len(),
            "layout complete"
        );
        Ok(rooms)
    }

    /// Lay out a canonical tree inside `boundary`.
    pub fn layout_tree(
        &self,
        root: &SpaceNode,
        boundary: BoundaryRect,
    ) -> Result<Vec<RoomRecord>, LayoutError> {
        self.layout(&SpaceProgram::from_node(root), boundary)
    }

    /// Area-balanced bisection of a flat list of rooms, ignoring tree shape.
    ///
    /// Records come back in the order of `leaves`.
    pub fn bisect_rooms(&self, leaves: &[&ProgramNode], boundary: BoundaryRect) -> Vec<RoomRecord> {
        let areas: Vec<f64> = leaves.iter().map(|leaf| leaf.area).collect();
        bisect(&areas, boundary)
            .into_iter()
            .map(|(index, rect)| RoomRecord::from_node(leaves[index], rect))
            .collect()
    }
}
