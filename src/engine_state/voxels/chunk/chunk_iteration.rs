//! # Chunk Iteration Module
//!
//! This module provides an iterator for traversing all non-air blocks in a
//! block array in storage order (x fastest, then y, then z).

use cgmath::Point3;

use crate::engine_state::voxels::block::block_type::BlockType;

use super::{BlockArray, CHUNK_SIZE};

/// An iterator over all non-air blocks in a chunk.
///
/// Yields each solid block together with its local position. Air blocks are
/// skipped, which is what both the mesh builder and the tree planter want.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the block array being iterated over
    blocks: &'a BlockArray,
    /// Next flattened index to inspect
    current_offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first block.
    pub fn new(blocks: &'a BlockArray) -> Self {
        ChunkBlockIterator {
            blocks,
            current_offset: 0,
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<usize>, BlockType);

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_offset < CHUNK_SIZE as usize {
            let offset = self.current_offset;
            self.current_offset += 1;

            let block_type = self.blocks.decode(offset);
            if block_type.is_solid() {
                return Some((BlockArray::position_of(offset), block_type));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_air_and_reports_positions_in_storage_order() {
        let mut blocks = BlockArray::empty();
        blocks.set(Point3::new(0, 1, 0), BlockType::DIRT);
        blocks.set(Point3::new(5, 0, 0), BlockType::STONE);
        blocks.set(Point3::new(0, 0, 2), BlockType::WOOD);

        let found: Vec<_> = blocks.iter_blocks().collect();
        assert_eq!(
            found,
            vec![
                (Point3::new(5, 0, 0), BlockType::STONE),
                (Point3::new(0, 1, 0), BlockType::DIRT),
                (Point3::new(0, 0, 2), BlockType::WOOD),
            ]
        );
    }
}
