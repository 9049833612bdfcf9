//! Mesh data structures and operations for voxel rendering.
//!
//! This module handles the conversion from faces to the vertex and index
//! buffers the rendering collaborator consumes.

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::{block::face_color, chunk::BlockArray};

use super::{culled, face::Face};

/// UV coordinates for the ll, lr, ul, ur corners of every face.
const FACE_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [0.0, 0.0], [1.0, 0.0]];

/// Renderable geometry for one chunk.
///
/// Vertices come in groups of four (one group per face) and indices in groups
/// of six (two triangles per face).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Mesh::default()
    }

    /// Generates a mesh for the given block data using face culling.
    pub fn culled(blocks: &BlockArray) -> Self {
        culled::culled(blocks)
    }

    /// Appends one quad to the mesh.
    pub fn add_face(&mut self, face: &Face) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(Self::generate_face_vertices(face));
        self.indices.extend(Self::generate_face_indices(base));
    }

    /// Generates vertex data for a single face of a block.
    ///
    /// # Returns
    /// The four corners of the face in ll, lr, ul, ur order, sharing the face
    /// normal and colour.
    pub fn generate_face_vertices(face: &Face) -> [Vertex; 4] {
        let normal = face.block_side.normal();
        let color = face_color(face.block_type, face.block_side);
        let corners = face.corners();

        std::array::from_fn(|i| {
            Vertex::new(corners[i], normal, FACE_UVS[i][0], FACE_UVS[i][1], color)
        })
    }

    /// Generates index data for a face whose first vertex sits at `base`.
    ///
    /// # Returns
    /// Two triangles sharing the lr/ul diagonal: `(i, i+1, i+2), (i+2, i+1, i+3)`.
    pub fn generate_face_indices(base: u32) -> [u32; 6] {
        [base, base + 1, base + 2, base + 2, base + 1, base + 3]
    }

    /// All vertices of the mesh.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All triangle indices of the mesh.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertex data as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Whether the mesh has no geometry at all.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
