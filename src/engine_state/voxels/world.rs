//! # World Module
//!
//! This module provides the `World` struct which manages the collection of chunks
//! around the player. It is the only owner of chunk data and the only code that
//! mutates it; everything else goes through the block query API.
//!
//! ## Streaming
//!
//! The world keeps exactly the `(2 * STREAMING_RADIUS + 1)²` chunk columns
//! centred on the player's chunk resident. [`World::update`] generates the
//! columns that entered that window and drops the ones that left it.
//!
//! ## Failure Semantics
//!
//! Queries into unloaded chunks or outside `0..CHUNK_DIMENSION` vertically read
//! as air, and edits there are ignored. Callers treat this as normal behaviour,
//! not an error.

use std::collections::HashMap;

use cgmath::Point3;
use log::{debug, info};

use crate::engine_state::rendering::{RenderScene, SceneCommand};

use super::block::block_type::BlockType;
use super::chunk::{
    chunk_creation::TerrainGenerator, to_local, Chunk, ChunkKey, CHUNK_DIMENSION,
};

/// Radius of the streaming window in chunks (3 gives a 7x7 window).
pub const STREAMING_RADIUS: i32 = 3;

/// Read-only access to block occupancy.
///
/// The collision resolver and the controllers only need this much of the world.
pub trait BlockQuery {
    /// The block at global block coordinates, or `AIR` when unknown.
    fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType;

    /// Whether a non-air block occupies the given global block coordinates.
    fn has_block(&self, x: i32, y: i32, z: i32) -> bool {
        self.get_block(x, y, z).is_solid()
    }

    /// Whether the terrain under a world position is known.
    ///
    /// Controllers hold bodies still over unknown terrain instead of letting
    /// them fall through it.
    fn is_loaded(&self, _position: Point3<f32>) -> bool {
        true
    }
}

/// The voxel world: the set of resident chunks plus the generator that fills new ones.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_sandbox::engine_state::voxels::{
///     block::block_type::BlockType, chunk::chunk_creation::TerrainGenerator, world::World,
/// };
///
/// let mut world = World::new(TerrainGenerator::new(0));
/// world.update(Point3::new(8.0, 10.0, 8.0));
/// assert_eq!(world.chunk_count(), 49);
///
/// world.set_block(8, 14, 8, BlockType::STONE);
/// assert_eq!(world.get_block(8, 14, 8), BlockType::STONE);
/// ```
pub struct World {
    /// Resident chunks keyed by chunk coordinates.
    chunks: HashMap<ChunkKey, Chunk>,
    /// Fills chunks that enter the streaming window.
    generator: TerrainGenerator,
    /// Mesh changes not yet applied to the render scene.
    scene_commands: Vec<SceneCommand>,
    /// Chunk the last streaming pass was centred on.
    current_center: Option<ChunkKey>,
}

impl World {
    /// Creates a new, empty world.
    ///
    /// # Arguments
    /// * `generator` - Terrain source for chunks that stream in
    pub fn new(generator: TerrainGenerator) -> Self {
        World {
            chunks: HashMap::new(),
            generator,
            scene_commands: Vec::new(),
            current_center: None,
        }
    }

    /// Streams chunks around the player.
    ///
    /// Generates every chunk of the window centred on the player's chunk that is
    /// not yet resident and unloads every resident chunk outside it. Calling this
    /// again while the player stays in the same chunk does nothing.
    ///
    /// # Arguments
    /// * `player_position` - The player's position in world space
    pub fn update(&mut self, player_position: Point3<f32>) {
        let center = ChunkKey::containing(player_position);
        if self.current_center == Some(center) {
            return;
        }
        self.current_center = Some(center);

        let outside: Vec<ChunkKey> = self
            .chunks
            .keys()
            .filter(|key| key.chebyshev_distance(&center) > STREAMING_RADIUS)
            .copied()
            .collect();
        for key in &outside {
            self.remove_chunk_at(*key);
        }

        let mut generated = 0;
        for dz in -STREAMING_RADIUS..=STREAMING_RADIUS {
            for dx in -STREAMING_RADIUS..=STREAMING_RADIUS {
                if self.add_chunk_at(ChunkKey::new(center.x + dx, center.z + dz)) {
                    generated += 1;
                }
            }
        }

        info!(
            "Streamed around chunk ({}, {}): {} generated, {} unloaded, {} resident",
            center.x,
            center.z,
            generated,
            outside.len(),
            self.chunks.len()
        );
    }

    /// Generates and inserts the chunk at `key` if it is not already resident.
    ///
    /// # Returns
    /// `true` if a chunk was generated.
    pub fn add_chunk_at(&mut self, key: ChunkKey) -> bool {
        if self.chunks.contains_key(&key) {
            return false;
        }

        let chunk = Chunk::new(key, self.generator.generate(key));
        self.scene_commands.push(SceneCommand::Insert {
            key,
            mesh: chunk.mesh(),
        });
        self.chunks.insert(key, chunk);
        true
    }

    /// Unloads the chunk at `key`, disposing its mesh.
    ///
    /// # Returns
    /// `true` if a chunk was resident there.
    pub fn remove_chunk_at(&mut self, key: ChunkKey) -> bool {
        if self.chunks.remove(&key).is_none() {
            return false;
        }
        self.scene_commands.push(SceneCommand::Dispose { key });
        true
    }

    /// Whether a non-air block occupies the given global block coordinates.
    ///
    /// # Returns
    /// `false` when the chunk is not resident or `y` is out of range.
    pub fn has_block(&self, x: i32, y: i32, z: i32) -> bool {
        self.get_block(x, y, z).is_solid()
    }

    /// The block at global block coordinates.
    ///
    /// # Returns
    /// `AIR` when the chunk is not resident or `y` is out of range. Never
    /// generates a chunk.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        let Some((key, local)) = to_local(x, y, z) else {
            return BlockType::AIR;
        };
        self.chunks
            .get(&key)
            .map_or(BlockType::AIR, |chunk| chunk.get_block_at(local))
    }

    /// Height of the topmost non-air block in the column `(x, z)`.
    ///
    /// # Returns
    /// `None` when the column is unloaded or empty.
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        (0..CHUNK_DIMENSION)
            .rev()
            .find(|y| self.has_block(x, *y, z))
    }

    /// Replaces the block at global block coordinates.
    ///
    /// Rebuilds the owning chunk's mesh and queues the scene swap (dispose the
    /// old mesh, insert the new one) before returning. Does nothing when the
    /// chunk is not resident or `y` is out of range.
    ///
    /// # Returns
    /// `true` if the block was written.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> bool {
        let Some((key, local)) = to_local(x, y, z) else {
            return false;
        };
        let Some(chunk) = self.chunks.get_mut(&key) else {
            return false;
        };

        let mesh = chunk.set_block_at(local, block_type);
        debug!(
            "Set ({}, {}, {}) to {:?}; chunk ({}, {}) remeshed",
            x, y, z, block_type, key.x, key.z
        );
        self.scene_commands.push(SceneCommand::Dispose { key });
        self.scene_commands.push(SceneCommand::Insert { key, mesh });
        true
    }

    /// Whether the chunk owning global block column `(x, z)` is resident.
    pub fn is_chunk_loaded(&self, x: i32, z: i32) -> bool {
        self.chunks.contains_key(&ChunkKey::from_block_coords(x, z))
    }

    /// Whether the chunk under a continuous world position is resident.
    pub fn is_position_loaded(&self, position: Point3<f32>) -> bool {
        self.chunks.contains_key(&ChunkKey::containing(position))
    }

    /// Retrieves a reference to the chunk at the specified chunk coordinates.
    pub fn get_chunk_at(&self, key: ChunkKey) -> Option<&Chunk> {
        self.chunks.get(&key)
    }

    /// Keys of all resident chunks, in no particular order.
    pub fn resident_keys(&self) -> impl Iterator<Item = ChunkKey> + '_ {
        self.chunks.keys().copied()
    }

    /// Number of resident chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Takes all queued scene commands, oldest first.
    pub fn drain_scene_commands(&mut self) -> Vec<SceneCommand> {
        std::mem::take(&mut self.scene_commands)
    }

    /// Applies all queued scene commands to `scene`, oldest first.
    pub fn flush_scene_commands(&mut self, scene: &mut dyn RenderScene) {
        for command in self.drain_scene_commands() {
            scene.apply(command);
        }
    }
}

impl BlockQuery for World {
    fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        World::get_block(self, x, y, z)
    }

    fn is_loaded(&self, position: Point3<f32>) -> bool {
        self.is_position_loaded(position)
    }
}
