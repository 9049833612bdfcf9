//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification and conversion from
//! the compact storage format.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// The discriminants are the values stored in chunk arrays and save bundles.
/// `AIR` is the universal "empty" sentinel: occupancy, collision and face
/// culling are all defined relative to it.
#[repr(u8)]
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize,
)]
pub enum BlockType {
    /// Empty space. Never rendered, never collides.
    #[default]
    AIR = 0,

    /// Surface block. Green top, grassy sides and a dirt bottom.
    GRASS = 1,

    /// The few layers directly under the grass.
    DIRT = 2,

    /// Fill between bedrock and dirt.
    STONE = 3,

    /// The bottom layer of every column. Cannot be broken by the player.
    BEDROCK = 4,

    /// Tree trunks.
    WOOD = 5,

    /// Tree canopies.
    LEAVES = 6,
}

/// Number of block types, including `AIR`.
pub const BLOCK_TYPE_COUNT: usize = 7;

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// # Arguments
    /// * `btype` - The block type as a `BlockTypeSize`
    ///
    /// # Returns
    /// The corresponding `BlockType`, or `None` for values outside the enum.
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// Whether this block occupies its voxel for collision and culling purposes.
    #[inline]
    pub fn is_solid(self) -> bool {
        self != BlockType::AIR
    }

    /// Whether the player is allowed to break this block.
    pub fn is_breakable(self) -> bool {
        !matches!(self, BlockType::AIR | BlockType::BEDROCK)
    }
}

impl From<BlockType> for BlockTypeSize {
    fn from(block_type: BlockType) -> Self {
        block_type as BlockTypeSize
    }
}
