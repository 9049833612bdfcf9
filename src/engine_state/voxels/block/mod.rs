//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling and the flat colour
//! table the mesh builder paints faces with.

use block_side::BlockSide;
use block_type::{BlockType, BLOCK_TYPE_COUNT};

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
/// Chunk arrays store this rather than the enum.
pub type BlockTypeSize = u8;

const GRASS_TOP: [f32; 3] = [0.36, 0.70, 0.24];
const GRASS_SIDE: [f32; 3] = [0.45, 0.56, 0.28];
const DIRT: [f32; 3] = [0.53, 0.38, 0.24];
const STONE: [f32; 3] = [0.50, 0.50, 0.52];
const BEDROCK: [f32; 3] = [0.18, 0.18, 0.20];
const BARK: [f32; 3] = [0.40, 0.27, 0.13];
const RINGS: [f32; 3] = [0.62, 0.48, 0.28];
const LEAVES: [f32; 3] = [0.20, 0.52, 0.18];

/// Maps each block type to its flat face colour for each side.
///
/// The outer array is indexed by `BlockType` as a `usize`.
/// The inner array contains 6 RGB colours, one for each face in the order:
/// [Front, Back, Bottom, Top, Left, Right]
pub static BLOCK_TYPE_TO_COLORS: [[[f32; 3]; 6]; BLOCK_TYPE_COUNT] = [
    [[0.0; 3]; 6], // AIR (never meshed)
    [GRASS_SIDE, GRASS_SIDE, DIRT, GRASS_TOP, GRASS_SIDE, GRASS_SIDE], // GRASS
    [DIRT; 6],     // DIRT
    [STONE; 6],    // STONE
    [BEDROCK; 6],  // BEDROCK
    [BARK, BARK, RINGS, RINGS, BARK, BARK], // WOOD
    [LEAVES; 6],   // LEAVES
];

/// Looks up the flat colour of one side of a block.
///
/// # Arguments
/// * `block_type` - The block being painted
/// * `side` - Which of its faces
pub fn face_color(block_type: BlockType, side: BlockSide) -> [f32; 3] {
    BLOCK_TYPE_TO_COLORS[block_type as usize][side as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grass_top_differs_from_grass_side() {
        assert_ne!(
            face_color(BlockType::GRASS, BlockSide::TOP),
            face_color(BlockType::GRASS, BlockSide::FRONT)
        );
        assert_eq!(
            face_color(BlockType::GRASS, BlockSide::LEFT),
            face_color(BlockType::GRASS, BlockSide::RIGHT)
        );
    }

    #[test]
    fn normals_are_unit_offsets() {
        for side in BlockSide::all() {
            let n = side.normal();
            let len_sq = n[0] * n[0] + n[1] * n[1] + n[2] * n[2];
            assert_eq!(len_sq, 1.0);
        }
    }
}
