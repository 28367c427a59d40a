//! Room layout for space programs.
//!
//! Turns a normalized space program and a bounding rectangle into a flat
//! list of room rectangles whose areas follow the program's area ratios.
//!
//! # Strategies
//!
//! 1. **Tree partition** (default): each internal node divides its
//!    rectangle among its children along the axis its angle selects
//! 2. **Bisection**: the final rooms are laid out as a flat list by
//!    area-balanced recursive cuts, ignoring the tree shape
//!
//! # Example
//!
//! ```
//! use spaceplan_core::{BoundaryRect, SpaceNode};
//! use spaceplan_layout::LayoutEngine;
//!
//! let root = SpaceNode::split(
//!     "root",
//!     1000.0,
//!     std::f64::consts::FRAC_PI_2,
//!     vec![SpaceNode::room("A", 600.0), SpaceNode::room("B", 400.0)],
//! );
//! let rooms = LayoutEngine::default()
//!     .layout_tree(&root, BoundaryRect::new(0.0, 0.0, 100.0, 50.0))
//!     .unwrap();
//! assert_eq!(rooms.len(), 2);
//! assert!((rooms[1].x - 60.0).abs() < 1e-9);
//! ```

mod bisect;
mod boundary;
mod cache;
mod config;
mod engine;
mod extract;
mod guard;
mod partition;
mod split;

pub use bisect::bisect;
pub use boundary::{
    boundary_from_shapes, capture_boundary, is_valid_boundary, parse_shapes, ShapeDescriptor,
    ShapeSource, BOUNDARY_KINDS,
};
pub use cache::{fingerprint, CacheStats, LayoutCache, DEFAULT_CACHE_CAPACITY};
pub use config::{
    LayoutConfig, LayoutStrategy, DEFAULT_BOUNDARY, DEFAULT_MAX_DEPTH, DEFAULT_VERTICAL_TOLERANCE,
};
pub use engine::LayoutEngine;
pub use extract::{final_nodes, final_program_nodes, leaf_nodes, PlacedLeaf};
pub use partition::partition;
pub use split::{split_rect, split_weights, SplitAxis};
