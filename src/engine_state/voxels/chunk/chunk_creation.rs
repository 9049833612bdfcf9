//! # Chunk Creation Module
//!
//! Procedural terrain for new chunks. Generation runs in two passes:
//!
//! 1. **Height map**: a 2D noise field sampled at world coordinates decides the
//!    surface height of every column, which is then filled bedrock → stone →
//!    dirt → grass.
//! 2. **Decoration**: each column whose top block is grass has a small chance to
//!    grow a tree.
//!
//! The height map is deterministic for a given noise function. Decoration draws
//! from its own random source, so regenerating a chunk can place trees
//! differently while the terrain underneath stays identical.

use cgmath::Point3;
use log::debug;
use noise::{NoiseFn, Perlin};

use crate::engine_state::voxels::block::block_type::BlockType;

use super::{BlockArray, ChunkKey, CHUNK_DIMENSION};

/// Scaling factor applied to world coordinates when sampling the noise field.
pub const TERRAIN_SCALE: f64 = 0.05;
/// Multiplier turning a noise sample into a height delta in blocks.
pub const HEIGHT_AMPLITUDE: f64 = 8.0;
/// Surface height for a noise sample of zero.
pub const HEIGHT_OFFSET: i32 = 4;
/// Number of dirt layers directly under the grass.
pub const DIRT_DEPTH: i32 = 3;
/// Probability that a grass-topped column grows a tree.
pub const TREE_CHANCE: f64 = 0.01;
/// Shortest trunk a tree can grow.
pub const TREE_TRUNK_MIN: i32 = 4;
/// Tallest trunk a tree can grow.
pub const TREE_TRUNK_MAX: i32 = 5;
/// Canopy reach in each horizontal direction from the trunk (5x5 footprint).
const CANOPY_RADIUS: i32 = 2;

/// Source of randomness for the decoration pass.
///
/// Kept separate from the noise field so tests can pin tree placement without
/// touching terrain.
pub trait DecorationRng {
    /// A uniform sample in `[0, 1)`, compared against `TREE_CHANCE`.
    fn roll(&mut self) -> f64;

    /// A trunk height in `TREE_TRUNK_MIN..=TREE_TRUNK_MAX`.
    fn trunk_height(&mut self) -> i32;
}

impl DecorationRng for fastrand::Rng {
    fn roll(&mut self) -> f64 {
        self.f64()
    }

    fn trunk_height(&mut self) -> i32 {
        self.i32(TREE_TRUNK_MIN..=TREE_TRUNK_MAX)
    }
}

/// Fills new chunks with terrain.
///
/// The generator owns both sources of variation: a 2D noise function for the
/// height map and a [`DecorationRng`] for vegetation.
pub struct TerrainGenerator {
    noise: Box<dyn NoiseFn<f64, 2>>,
    rng: Box<dyn DecorationRng>,
}

impl TerrainGenerator {
    /// Creates a generator backed by Perlin noise and an entropy-seeded RNG.
    ///
    /// # Arguments
    /// * `seed` - Seed for the Perlin height map
    pub fn new(seed: u32) -> Self {
        Self::with_sources(Perlin::new(seed), fastrand::Rng::new())
    }

    /// Creates a generator from explicit noise and decoration sources.
    pub fn with_sources(
        noise: impl NoiseFn<f64, 2> + 'static,
        rng: impl DecorationRng + 'static,
    ) -> Self {
        TerrainGenerator {
            noise: Box::new(noise),
            rng: Box::new(rng),
        }
    }

    /// Surface height of the column at global block coordinates `(x, z)`.
    ///
    /// # Returns
    /// `floor(noise * HEIGHT_AMPLITUDE) + HEIGHT_OFFSET`, clamped to `[1, CHUNK_DIMENSION - 1]`.
    pub fn column_height(&self, x: i32, z: i32) -> i32 {
        let sample = self
            .noise
            .get([x as f64 * TERRAIN_SCALE, z as f64 * TERRAIN_SCALE]);
        let height = (sample * HEIGHT_AMPLITUDE).floor() as i32 + HEIGHT_OFFSET;
        height.clamp(1, CHUNK_DIMENSION - 1)
    }

    /// Generates the block data for the chunk at `key`.
    ///
    /// # Arguments
    /// * `key` - The chunk coordinates to generate
    ///
    /// # Returns
    /// A fully populated `BlockArray`, terrain and trees included.
    pub fn generate(&mut self, key: ChunkKey) -> BlockArray {
        let mut blocks = BlockArray::empty();
        let origin = key.origin();

        for z in 0..CHUNK_DIMENSION {
            for x in 0..CHUNK_DIMENSION {
                let height = self.column_height(origin.x + x, origin.z + z);
                for y in 0..=height {
                    let block_type = Self::layer_for(y, height);
                    blocks.set(Point3::new(x as usize, y as usize, z as usize), block_type);
                }
            }
        }

        let trees = self.plant_trees(&mut blocks);
        debug!("Generated chunk ({}, {}) with {} trees", key.x, key.z, trees);

        blocks
    }

    /// Which block sits at height `y` of a column whose surface is at `height`.
    fn layer_for(y: i32, height: i32) -> BlockType {
        if y == 0 {
            BlockType::BEDROCK
        } else if y == height {
            BlockType::GRASS
        } else if y >= height - DIRT_DEPTH {
            BlockType::DIRT
        } else {
            BlockType::STONE
        }
    }

    /// Decoration pass. Returns the number of trees grown.
    fn plant_trees(&mut self, blocks: &mut BlockArray) -> usize {
        let mut trees = 0;
        for z in 0..CHUNK_DIMENSION {
            for x in 0..CHUNK_DIMENSION {
                let Some(top) = (0..CHUNK_DIMENSION)
                    .rev()
                    .find(|y| blocks.is_block_solid(Point3::new(x, *y, z)))
                else {
                    continue;
                };

                if blocks.get_checked(Point3::new(x, top, z)) != Some(BlockType::GRASS) {
                    continue;
                }

                if self.rng.roll() < TREE_CHANCE {
                    let trunk_height = self.rng.trunk_height();
                    Self::grow_tree(blocks, Point3::new(x, top, z), trunk_height);
                    trees += 1;
                }
            }
        }
        trees
    }

    /// Grows a tree rooted on the grass block at `ground`.
    ///
    /// The trunk rises `trunk_height` blocks above the grass; the canopy is a
    /// 5x5x3 slab of leaves centred on the trunk top. Everything is clipped to
    /// the chunk and leaves never replace wood.
    fn grow_tree(blocks: &mut BlockArray, ground: Point3<i32>, trunk_height: i32) {
        for dy in 1..=trunk_height {
            let pos = Point3::new(ground.x, ground.y + dy, ground.z);
            if let Some(local) = pos.cast::<usize>().filter(|_| BlockArray::in_bounds(pos)) {
                blocks.set(local, BlockType::WOOD);
            }
        }

        let trunk_top = ground.y + trunk_height;
        for y in trunk_top - 1..=trunk_top + 1 {
            for dz in -CANOPY_RADIUS..=CANOPY_RADIUS {
                for dx in -CANOPY_RADIUS..=CANOPY_RADIUS {
                    let pos = Point3::new(ground.x + dx, y, ground.z + dz);
                    match blocks.get_checked(pos) {
                        None | Some(BlockType::WOOD) => {}
                        Some(_) => {
                            if let Some(local) = pos.cast::<usize>() {
                                blocks.set(local, BlockType::LEAVES);
                            }
                        }
                    }
                }
            }
        }
    }
}
