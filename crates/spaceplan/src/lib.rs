//! Room layouts from generated space programs.
//!
//! [`SpacePlanner`] runs the whole pipeline: a raw generator response and
//! the shapes drawn on a surface go in, placed rooms come out.
//!
//! ```text
//! response ──► unwrap / normalize ──► SpaceNode tree ─┐
//!                                                     ├──► LayoutEngine ──► RoomRecord list
//! shapes ────► first shape or default ──► boundary ───┘
//! ```
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use spaceplan::SpacePlanner;
//!
//! let mut planner = SpacePlanner::default();
//! let response = json!({"json_result": {"split": {
//!     "name": "root", "area": 1000, "angle": 1.5708,
//!     "children": [
//!         {"name": "A", "area": 600, "final": true},
//!         {"name": "B", "area": 400, "final": true}
//!     ]
//! }}});
//! let shapes = json!([
//!     {"id": "s1", "type": "rectangle", "x": 0, "y": 0, "width": 100, "height": 50}
//! ]);
//!
//! let rooms = planner.plan(&response, &shapes, "").unwrap();
//! assert_eq!(rooms.len(), 2);
//! assert!((rooms[1].x - 60.0).abs() < 1e-9);
//! ```

use serde_json::Value;
use tracing::debug;

pub use spaceplan_core::{
    BoundaryError, BoundaryRect, HierarchyDefect, LayoutError, ProgramError, Result, RoomRecord,
    SpaceNode, SpacePlanError, SpaceProgram,
};
pub use spaceplan_layout::{
    CacheStats, LayoutCache, LayoutConfig, LayoutEngine, LayoutStrategy, ShapeDescriptor,
    ShapeSource,
};
pub use spaceplan_program::{NormalizeOptions, Normalized, RootConvention};

/// Layout pipeline for one drawing surface.
///
/// Holds the configuration, a cache of recent layouts and the rooms from
/// the last successful run.
#[derive(Debug, Default)]
pub struct SpacePlanner {
    engine: LayoutEngine,
    normalize: NormalizeOptions,
    cache: LayoutCache,
    last_rooms: Vec<RoomRecord>,
}

impl SpacePlanner {
    pub fn new(config: LayoutConfig) -> Self {
        let normalize = NormalizeOptions::default().with_max_depth(config.max_depth);
        Self {
            engine: LayoutEngine::new(config),
            normalize,
            cache: LayoutCache::default(),
            last_rooms: Vec::new(),
        }
    }

    /// Read layout options from JSON; missing fields take their defaults.
    pub fn from_config_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        Ok(Self::new(LayoutConfig::from_json_str(json)?))
    }

    /// Replace the normalization options. The nesting limit always follows
    /// the layout config so that overflowing input fails the layout.
    pub fn with_normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.normalize = options.with_max_depth(self.engine.config().max_depth);
        self
    }

    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn config(&self) -> &LayoutConfig {
        self.engine.config()
    }

    /// Lay out the program in a generator `response` inside the boundary
    /// described by `shapes` (a JSON array of shape descriptors, or null).
    ///
    /// `style` takes part in cache keys only.
    pub fn plan(
        &mut self,
        response: &Value,
        shapes: &Value,
        style: &str,
    ) -> Result<Vec<RoomRecord>> {
        let program = spaceplan_program::read_program(response, &self.normalize)?;
        let shapes = spaceplan_layout::parse_shapes(shapes)?;
        self.run(program, &shapes, style)
    }

    /// Like [`plan`](Self::plan), for free generator text with the JSON
    /// embedded somewhere inside it.
    pub fn plan_text(
        &mut self,
        text: &str,
        shapes: &Value,
        style: &str,
    ) -> Result<Vec<RoomRecord>> {
        let program = spaceplan_program::read_program_text(text, &self.normalize)?;
        let shapes = spaceplan_layout::parse_shapes(shapes)?;
        self.run(program, &shapes, style)
    }

    /// Like [`plan`](Self::plan), reading the boundary from a live drawing
    /// surface.
    pub fn plan_on<S: ShapeSource + ?Sized>(
        &mut self,
        response: &Value,
        surface: &S,
        style: &str,
    ) -> Result<Vec<RoomRecord>> {
        let program = spaceplan_program::read_program(response, &self.normalize)?;
        self.run(program, &surface.shapes(), style)
    }

    /// Lay out an already normalized tree.
    pub fn layout(
        &mut self,
        root: &SpaceNode,
        shapes: &[ShapeDescriptor],
        style: &str,
    ) -> Result<Vec<RoomRecord>> {
        let boundary = self.boundary(shapes);
        let program = SpaceProgram::from_node(root);
        let rooms = self.cache.get_or_compute(&self.engine, &program, boundary, style)?;
        self.last_rooms.clone_from(&rooms);
        Ok(rooms)
    }

    /// Every leaf of `root` (final or childless) with its rectangle, for
    /// previews that should also show unfinished parts of the program.
    pub fn preview_leaves(&self, root: &SpaceNode, shapes: &[ShapeDescriptor]) -> Vec<RoomRecord> {
        spaceplan_layout::leaf_nodes(root, self.boundary(shapes), self.config().vertical_tolerance)
            .iter()
            .map(|leaf| leaf.to_record())
            .collect()
    }

    /// The rectangle a run with these shapes would fill.
    pub fn boundary(&self, shapes: &[ShapeDescriptor]) -> BoundaryRect {
        spaceplan_layout::boundary_from_shapes(shapes, self.config().default_boundary)
    }

    /// Rooms from the last successful run.
    pub fn last_rooms(&self) -> &[RoomRecord] {
        &self.last_rooms
    }

    /// The last rooms as a JSON array for the renderer.
    pub fn last_rooms_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(&self.last_rooms)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn run(
        &mut self,
        program: Normalized,
        shapes: &[ShapeDescriptor],
        style: &str,
    ) -> Result<Vec<RoomRecord>> {
        debug!(convention = ?program.convention, shapes = shapes.len(), "planning");
        self.layout(&program.root, shapes, style)
    }
}
