//! Core types for turning generated space programs into room layouts.
//!
//! This crate provides the types shared by the other spaceplan crates:
//! - [`SpaceNode`], the canonical program tree, and [`SpaceProgram`], its id-indexed form
//! - [`BoundaryRect`], the region being partitioned
//! - [`RoomRecord`], one placed room
//! - Error types

pub mod errors;
pub mod geometry;
pub mod node;
pub mod room;

pub use errors::*;
pub use geometry::BoundaryRect;
pub use node::{ProgramNode, SpaceNode, SpaceNodeId, SpaceProgram};
pub use room::RoomRecord;
