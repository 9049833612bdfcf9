//! Vertex data structures for voxel geometry.
//!
//! This module defines the vertex format handed to the rendering collaborator.
//! Vertices are plain-old-data so a mesh can be uploaded with a single
//! `bytemuck::cast_slice`.

use cgmath::Point3;

/// A vertex of a chunk mesh.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Normal: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Color: [f32; 3] (12 bytes)
///
/// Total size: 44 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk-local space
    pub position: [f32; 3],
    /// Outward face normal, identical for all four corners of a face
    pub normal: [f32; 3],
    /// UV texture coordinates (fixed unit-quad corners)
    pub tex_coords: [f32; 2],
    /// Flat per-face colour
    pub color: [f32; 3],
}

impl Vertex {
    /// Creates a new vertex with the given parameters.
    ///
    /// # Arguments
    /// * `pos` - The corner position in chunk-local block units
    /// * `normal` - The face normal
    /// * `u`, `v` - Texture coordinates
    /// * `color` - The face colour
    pub fn new(pos: Point3<usize>, normal: [f32; 3], u: f32, v: f32, color: [f32; 3]) -> Self {
        Vertex {
            position: [pos.x as f32, pos.y as f32, pos.z as f32],
            normal,
            tex_coords: [u, v],
            color,
        }
    }
}
