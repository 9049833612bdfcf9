//! # Chunk Module
//!
//! This module provides the `Chunk` struct and related functionality for managing
//! 16x16x16 blocks of voxel data, together with the terrain generator that fills
//! new chunks.
//!
//! ## Storage
//!
//! Chunks store one `BlockTypeSize` per voxel in a dense array addressed by the
//! flattened index `x + y * 16 + z * 16²`. Every chunk also owns the mesh built
//! from that array; the two are created together, replaced together on edit and
//! dropped together on unload, so no caller ever observes one without the other.
//!
//! ### Performance Characteristics
//! - **Block Lookup**: O(1)
//! - **Edit**: O(n) - every edit rebuilds the whole chunk mesh
//! - **Memory Usage**: 4 KiB of block data per chunk plus its mesh

use std::rc::Rc;

use cgmath::Point3;

use super::block::{block_type::BlockType, BlockTypeSize};
use crate::engine_state::rendering::meshing::Mesh;
use chunk_iteration::ChunkBlockIterator;

pub mod chunk_creation;
pub mod chunk_iteration;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// Horizontal position of a chunk column, in chunk coordinates.
///
/// There is no vertical component: the world is exactly one chunk tall.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkKey {
    /// Chunk X coordinate (block x divided by `CHUNK_DIMENSION`, floored)
    pub x: i32,
    /// Chunk Z coordinate (block z divided by `CHUNK_DIMENSION`, floored)
    pub z: i32,
}

impl ChunkKey {
    /// Creates a key from chunk coordinates.
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkKey { x, z }
    }

    /// Returns the key of the chunk owning the given global block column.
    pub fn from_block_coords(x: i32, z: i32) -> Self {
        ChunkKey {
            x: x.div_euclid(CHUNK_DIMENSION),
            z: z.div_euclid(CHUNK_DIMENSION),
        }
    }

    /// Returns the key of the chunk containing a continuous world position.
    pub fn containing(position: Point3<f32>) -> Self {
        ChunkKey {
            x: (position.x / CHUNK_DIMENSION as f32).floor() as i32,
            z: (position.z / CHUNK_DIMENSION as f32).floor() as i32,
        }
    }

    /// Global block coordinates of this chunk's (0, 0, 0) corner.
    pub fn origin(&self) -> Point3<i32> {
        Point3::new(self.x * CHUNK_DIMENSION, 0, self.z * CHUNK_DIMENSION)
    }

    /// Chebyshev distance between two chunk columns.
    pub fn chebyshev_distance(&self, other: &ChunkKey) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

/// Converts global block coordinates into the owning chunk key and local coordinates.
///
/// # Returns
/// `None` when `y` lies outside `[0, CHUNK_DIMENSION)`; the world is not chunked vertically.
pub fn to_local(x: i32, y: i32, z: i32) -> Option<(ChunkKey, Point3<usize>)> {
    if !(0..CHUNK_DIMENSION).contains(&y) {
        return None;
    }
    let key = ChunkKey::from_block_coords(x, z);
    let local = Point3::new(
        (x - key.x * CHUNK_DIMENSION) as usize,
        y as usize,
        (z - key.z * CHUNK_DIMENSION) as usize,
    );
    Some((key, local))
}

/// A dense `CHUNK_DIMENSION³` grid of block types.
#[derive(Clone, PartialEq, Eq)]
pub struct BlockArray {
    blocks: Vec<BlockTypeSize>,
}

impl std::fmt::Debug for BlockArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let solid = self.blocks.iter().filter(|b| **b != 0).count();
        f.debug_struct("BlockArray").field("solid", &solid).finish()
    }
}

impl Default for BlockArray {
    fn default() -> Self {
        Self::empty()
    }
}

impl BlockArray {
    /// Creates a new, completely empty array (all blocks are air).
    pub fn empty() -> Self {
        BlockArray {
            blocks: vec![BlockType::AIR.into(); CHUNK_SIZE as usize],
        }
    }

    /// Flattened index of a local position: `x + y * 16 + z * 16²`.
    #[inline]
    pub fn index(x: usize, y: usize, z: usize) -> usize {
        x + CHUNK_DIMENSION as usize * y + CHUNK_PLANE_SIZE as usize * z
    }

    /// Inverse of [`BlockArray::index`].
    #[inline]
    pub fn position_of(index: usize) -> Point3<usize> {
        let dim = CHUNK_DIMENSION as usize;
        Point3::new(index % dim, (index / dim) % dim, index / (dim * dim))
    }

    /// Whether a signed local position lies inside the chunk.
    #[inline]
    pub fn in_bounds(pos: Point3<i32>) -> bool {
        let range = 0..CHUNK_DIMENSION;
        range.contains(&pos.x) && range.contains(&pos.y) && range.contains(&pos.z)
    }

    /// Gets the block type at the specified chunk-relative coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn get(&self, pos: Point3<usize>) -> BlockType {
        self.decode(Self::index(pos.x, pos.y, pos.z))
    }

    /// Gets the block type at signed chunk-relative coordinates.
    ///
    /// # Returns
    /// `None` when the position falls outside the chunk.
    pub fn get_checked(&self, pos: Point3<i32>) -> Option<BlockType> {
        if !Self::in_bounds(pos) {
            return None;
        }
        Some(self.get(pos.cast::<usize>()?))
    }

    /// Checks if the block at the specified coordinates is solid.
    ///
    /// # Returns
    /// `true` if the block is solid, `false` if it's air or out of bounds.
    pub fn is_block_solid(&self, pos: Point3<i32>) -> bool {
        self.get_checked(pos).is_some_and(BlockType::is_solid)
    }

    /// Sets the block type at the specified chunk-relative coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn set(&mut self, pos: Point3<usize>, block_type: BlockType) {
        self.blocks[Self::index(pos.x, pos.y, pos.z)] = block_type.into();
    }

    /// Iterates over every non-air block together with its local position.
    pub fn iter_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// Number of non-air blocks in the array.
    pub fn solid_count(&self) -> usize {
        self.iter_blocks().count()
    }

    fn decode(&self, index: usize) -> BlockType {
        BlockType::get_block_type_from_int(self.blocks[index]).unwrap_or_default()
    }
}

/// Represents a 16x16x16 column of voxel blocks in the world.
///
/// Chunks are the unit of generation, streaming and meshing. The mesh is always
/// rebuilt from the block array whenever the array changes, so it is a pure
/// function of the current blocks.
#[derive(Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: ChunkKey,
    blocks: BlockArray,
    mesh: Rc<Mesh>,
}

impl Chunk {
    /// Wraps a generated block array, building its mesh immediately.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    /// * `blocks` - The generated block data
    pub fn new(position: ChunkKey, blocks: BlockArray) -> Self {
        let mesh = Rc::new(Mesh::culled(&blocks));
        Chunk {
            position,
            blocks,
            mesh,
        }
    }

    /// Read access to the block data.
    pub fn blocks(&self) -> &BlockArray {
        &self.blocks
    }

    /// Shared handle to the current mesh.
    pub fn mesh(&self) -> Rc<Mesh> {
        self.mesh.clone()
    }

    /// Gets the block at local coordinates.
    pub fn get_block_at(&self, local: Point3<usize>) -> BlockType {
        self.blocks.get(local)
    }

    /// Replaces the block at local coordinates and rebuilds the whole mesh.
    ///
    /// # Returns
    /// The new mesh, which has already replaced the old one inside the chunk.
    pub fn set_block_at(&mut self, local: Point3<usize>, block_type: BlockType) -> Rc<Mesh> {
        self.blocks.set(local, block_type);
        self.mesh = Rc::new(Mesh::culled(&self.blocks));
        self.mesh.clone()
    }
}
