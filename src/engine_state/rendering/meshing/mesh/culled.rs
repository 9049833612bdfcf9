//! Face-culled meshing for voxel chunks.
//!
//! Every solid voxel contributes one quad per side whose neighbour is air or
//! lies outside the chunk. No faces are merged. Neighbouring chunks are never
//! consulted, so faces on chunk borders are always emitted even when the
//! adjacent chunk is solid there.

use cgmath::Point3;
use log::debug;
use web_time::Instant;

use crate::engine_state::voxels::{block::block_side::BlockSide, chunk::BlockArray};

use super::{face::Face, mesh::Mesh};

/// Whether the face of the voxel at `pos` pointing towards `side` is visible.
///
/// # Returns
/// `true` if the neighbour is air or outside the chunk.
pub fn is_face_exposed(blocks: &BlockArray, pos: Point3<usize>, side: BlockSide) -> bool {
    let neighbor = pos.cast::<i32>().map(|p| p + side.neighbor_offset());
    match neighbor {
        Some(neighbor) => !blocks.is_block_solid(neighbor),
        None => true,
    }
}

/// Generates a mesh for a whole chunk by emitting every exposed face.
///
/// # Arguments
/// * `blocks` - The block data to mesh
///
/// # Returns
/// A new `Mesh` with four vertices and six indices per exposed face.
///
/// # Performance
/// Visits every solid voxel and tests all six neighbours: O(n) in the number of
/// voxels. This is the dominant per-chunk cost and reruns in full on every edit.
pub fn culled(blocks: &BlockArray) -> Mesh {
    let start = Instant::now();
    let mut mesh = Mesh::new();

    for (position, block_type) in blocks.iter_blocks() {
        for side in BlockSide::all() {
            if is_face_exposed(blocks, position, side) {
                mesh.add_face(&Face::new(
                    position.x,
                    position.y,
                    position.z,
                    block_type,
                    side,
                ));
            }
        }
    }

    debug!(
        "Meshed {} faces in {:?}",
        mesh.face_count(),
        start.elapsed()
    );

    mesh
}
