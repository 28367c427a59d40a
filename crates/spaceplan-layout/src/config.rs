//! Layout configuration.

use serde::{Deserialize, Serialize};
use spaceplan_core::BoundaryRect;

/// Rectangle used when no boundary shape is supplied.
pub const DEFAULT_BOUNDARY: BoundaryRect = BoundaryRect::new(200.0, 200.0, 600.0, 400.0);

/// Default recursion limit for layout walks.
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Default tolerance, in radians, around π/2 for a vertical split.
pub const DEFAULT_VERTICAL_TOLERANCE: f64 = 0.1;

/// How a program is turned into rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStrategy {
    /// Sort the final rooms by area and bisect the list recursively,
    /// alternating the split axis. Tree shape and angles are ignored.
    Bisect,
    /// Follow the tree: each internal node splits its rectangle among its
    /// children along the axis given by its angle.
    #[default]
    TreePartition,
}

impl LayoutStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            LayoutStrategy::Bisect => "bisect",
            LayoutStrategy::TreePartition => "tree_partition",
        }
    }
}

/// Options for layout computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Region used when the boundary input has no shapes
    pub default_boundary: BoundaryRect,
    /// Nodes nested deeper than this abort the layout
    pub max_depth: u32,
    /// Angles within this distance of π/2 split side by side
    pub vertical_tolerance: f64,
    pub strategy: LayoutStrategy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_boundary: DEFAULT_BOUNDARY,
            max_depth: DEFAULT_MAX_DEPTH,
            vertical_tolerance: DEFAULT_VERTICAL_TOLERANCE,
            strategy: LayoutStrategy::default(),
        }
    }
}

impl LayoutConfig {
    /// Read a configuration from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the fallback boundary.
    pub fn with_default_boundary(mut self, boundary: BoundaryRect) -> Self {
        self.default_boundary = boundary;
        self
    }

    /// Set the recursion limit.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the vertical-split tolerance.
    pub fn with_vertical_tolerance(mut self, tolerance: f64) -> Self {
        self.vertical_tolerance = tolerance;
        self
    }

    /// Set the layout strategy.
    pub fn with_strategy(mut self, strategy: LayoutStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.default_boundary, BoundaryRect::new(200.0, 200.0, 600.0, 400.0));
        assert_eq!(config.max_depth, 64);
        assert_eq!(config.strategy, LayoutStrategy::TreePartition);
    }

    #[test]
    fn test_partial_json() {
        let config = LayoutConfig::from_json_str(
            r#"{
                "strategy": "bisect",
                "default_boundary": {"x": 0, "y": 0, "width": 1000, "height": 800}
            }"#,
        )
        .unwrap();
        assert_eq!(config.strategy, LayoutStrategy::Bisect);
        assert_eq!(config.default_boundary.width, 1000.0);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!((config.vertical_tolerance - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        assert!(LayoutConfig::from_json_str(r#"{"strategy": "squarify"}"#).is_err());
    }
}
