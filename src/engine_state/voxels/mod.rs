//! # Voxel World
//!
//! Storage, generation and streaming of the block world.
//!
//! ## Architecture
//!
//! * **Block**: Block types, block faces and their colours
//! * **Chunk**: Fixed-size 16³ block arrays, their meshes and the terrain generator
//! * **World**: The resident chunk set, streamed around the player, and the
//!   block-level query/mutation API
//!
//! ## Data Flow
//!
//! 1. `World::update` asks the terrain generator for chunks entering the window
//! 2. Each new chunk builds its mesh immediately
//! 3. Block edits rebuild the owning chunk's mesh synchronously
//! 4. Mesh changes are queued as scene commands for the renderer

pub mod block;
pub mod chunk;
pub mod world;
