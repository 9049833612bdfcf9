//! Mesh generation for voxel chunks.
//!
//! This module converts chunk block data into renderable triangle meshes. Every
//! visible voxel face becomes one quad; hidden faces between two solid voxels
//! are dropped.
//!
//! # Architecture
//! - `mesh/`: The face, mesh and culling implementations
//!
//! # Performance Considerations
//! - Meshing is O(n) in chunk volume and reruns in full whenever a block changes
//! - Several edits to one chunk in a step each trigger a full rebuild; a dirty
//!   flag with one deferred rebuild per step is an open optimisation

mod mesh;

pub use mesh::*;
