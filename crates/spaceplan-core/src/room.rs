//! Room records handed to renderers.

use serde::{Deserialize, Serialize};

use crate::geometry::BoundaryRect;
use crate::node::{ProgramNode, SpaceNode, SpaceNodeId};

/// Name given to unnamed nodes.
pub const UNNAMED_ROOM: &str = "Unnamed Room";

/// A concrete room rectangle produced by one layout run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    pub id: String,
    pub name: String,
    /// Room type, used by renderers to pick a presentation color
    #[serde(rename = "type")]
    pub kind: String,
    pub area: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
    pub is_final: bool,
}

impl RoomRecord {
    /// Create the record for a program node placed at `rect`.
    pub fn from_node(node: &ProgramNode, rect: BoundaryRect) -> Self {
        Self::placed(
            node.id,
            &node.name,
            node.kind.as_deref(),
            node.area,
            node.angle,
            node.is_final,
            rect,
        )
    }

    /// Create the record for a canonical node whose pre-order index is `id`.
    pub fn from_space_node(id: SpaceNodeId, node: &SpaceNode, rect: BoundaryRect) -> Self {
        Self::placed(
            id,
            &node.name,
            node.kind.as_deref(),
            node.area,
            node.angle,
            node.is_final,
            rect,
        )
    }

    fn placed(
        id: SpaceNodeId,
        name: &str,
        kind: Option<&str>,
        area: f64,
        angle: f64,
        is_final: bool,
        rect: BoundaryRect,
    ) -> Self {
        Self {
            id: room_id(id),
            name: display_name(name, kind),
            kind: room_kind(name, kind),
            area,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            angle,
            is_final,
        }
    }

    /// The rectangle occupied by this room.
    pub fn bounds(&self) -> BoundaryRect {
        BoundaryRect::new(self.x, self.y, self.width, self.height)
    }
}

/// Stable record id for a program node.
pub fn room_id(id: SpaceNodeId) -> String {
    format!("room-{}", id.0)
}

/// Label shown for a room. A node still called `root` is labelled by its type.
pub fn display_name(name: &str, kind: Option<&str>) -> String {
    match name {
        "" => kind.unwrap_or(UNNAMED_ROOM).to_string(),
        "root" => kind.unwrap_or("Room").to_string(),
        _ => name.to_string(),
    }
}

/// Room type: the explicit kind, else the node name, else `room`.
pub fn room_kind(name: &str, kind: Option<&str>) -> String {
    match kind {
        Some(kind) if !kind.is_empty() => kind.to_string(),
        _ if !name.is_empty() && name != "root" => name.to_string(),
        _ => "room".to_string(),
    }
}
