//! Mesh generation for voxel rendering.
//!
//! # Architecture
//! - [`Mesh`]: A chunk's vertices and triangle indices
//! - [`Face`]: A single face of a voxel with its corners and properties
//! - [`culled`]: Visible-face extraction over a chunk's block array
//!
//! # Usage
//! ```
//! use voxel_sandbox::engine_state::{
//!     rendering::meshing::Mesh,
//!     voxels::chunk::BlockArray,
//! };
//!
//! let mesh = Mesh::culled(&BlockArray::empty());
//! assert!(mesh.is_empty());
//! ```

mod culled;
mod face;
mod mesh;

pub use culled::{culled, is_face_exposed};
pub use face::Face;
pub use mesh::*;

#[cfg(test)]
mod tests {
    use cgmath::{Point3, Vector3};

    use super::*;
    use crate::engine_state::voxels::{
        block::{block_side::BlockSide, block_type::BlockType},
        chunk::{BlockArray, CHUNK_DIMENSION},
    };

    fn brute_force_exposed_faces(blocks: &BlockArray) -> usize {
        let mut count = 0;
        for z in 0..CHUNK_DIMENSION {
            for y in 0..CHUNK_DIMENSION {
                for x in 0..CHUNK_DIMENSION {
                    if !blocks.is_block_solid(Point3::new(x, y, z)) {
                        continue;
                    }
                    for side in BlockSide::all() {
                        let n = Point3::new(x, y, z) + side.neighbor_offset();
                        if !blocks.is_block_solid(n) {
                            count += 1;
                        }
                    }
                }
            }
        }
        count
    }

    #[test]
    fn single_block_has_six_faces() {
        let mut blocks = BlockArray::empty();
        blocks.set(Point3::new(4, 4, 4), BlockType::DIRT);
        let mesh = Mesh::culled(&blocks);
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.vertices().len(), 24);
        assert_eq!(mesh.indices().len(), 36);
    }

    #[test]
    fn shared_faces_are_culled() {
        let mut blocks = BlockArray::empty();
        blocks.set(Point3::new(4, 4, 4), BlockType::DIRT);
        blocks.set(Point3::new(5, 4, 4), BlockType::STONE);
        assert_eq!(Mesh::culled(&blocks).face_count(), 10);
    }

    #[test]
    fn chunk_boundary_counts_as_exposed() {
        let mut blocks = BlockArray::empty();
        for z in 0..16 {
            for x in 0..16 {
                blocks.set(Point3::new(x, 0, z), BlockType::BEDROCK);
            }
        }
        let mesh = Mesh::culled(&blocks);
        // top + bottom of every block, plus 4 * 16 side faces on the rim
        assert_eq!(mesh.face_count(), 2 * 256 + 4 * 16);
    }

    #[test]
    fn face_count_matches_exposed_pairs() {
        let mut blocks = BlockArray::empty();
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..600 {
            let p = Point3::new(rng.usize(0..16), rng.usize(0..16), rng.usize(0..16));
            blocks.set(p, BlockType::STONE);
        }
        let mesh = Mesh::culled(&blocks);
        assert_eq!(mesh.face_count(), brute_force_exposed_faces(&blocks));
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let mut blocks = BlockArray::empty();
        blocks.set(Point3::new(0, 0, 0), BlockType::GRASS);
        blocks.set(Point3::new(0, 1, 0), BlockType::WOOD);
        blocks.set(Point3::new(9, 15, 3), BlockType::LEAVES);
        assert_eq!(Mesh::culled(&blocks), Mesh::culled(&blocks));
    }

    #[test]
    fn triangles_wind_around_the_face_normal() {
        let mut blocks = BlockArray::empty();
        blocks.set(Point3::new(2, 3, 4), BlockType::STONE);
        let mesh = Mesh::culled(&blocks);
        let to_vec = |v: &crate::engine_state::rendering::Vertex| {
            Vector3::new(v.position[0], v.position[1], v.position[2])
        };

        for tri in mesh.indices().chunks(3) {
            let a = to_vec(&mesh.vertices()[tri[0] as usize]);
            let b = to_vec(&mesh.vertices()[tri[1] as usize]);
            let c = to_vec(&mesh.vertices()[tri[2] as usize]);
            let normal = mesh.vertices()[tri[0] as usize].normal;
            let cross = (b - a).cross(c - a);
            assert_eq!([cross.x, cross.y, cross.z], normal);
        }
    }

    #[test]
    fn indices_follow_quad_pattern() {
        assert_eq!(Mesh::generate_face_indices(8), [8, 9, 10, 10, 9, 11]);
    }

    #[test]
    fn grass_top_is_coloured_differently() {
        let mut blocks = BlockArray::empty();
        blocks.set(Point3::new(1, 1, 1), BlockType::GRASS);
        let mesh = Mesh::culled(&blocks);
        let top = mesh
            .vertices()
            .iter()
            .find(|v| v.normal == [0.0, 1.0, 0.0])
            .unwrap();
        let side = mesh
            .vertices()
            .iter()
            .find(|v| v.normal == [1.0, 0.0, 0.0])
            .unwrap();
        assert_ne!(top.color, side.color);
        assert_eq!(mesh.vertex_bytes().len(), 24 * std::mem::size_of::<crate::engine_state::rendering::Vertex>());
    }
}
