//! Render-scene boundary.
//!
//! The world never talks to a renderer directly. Whenever a chunk mesh appears,
//! changes or goes away, the world queues a [`SceneCommand`]. Once per frame the
//! rendering collaborator drains that queue into its own scene graph through the
//! [`RenderScene`] trait.

use std::rc::Rc;

use crate::engine_state::voxels::chunk::ChunkKey;

use super::meshing::Mesh;

/// A change to the set of chunk meshes visible in the scene.
#[derive(Debug, Clone)]
pub enum SceneCommand {
    /// Add the mesh for `key`. Any previous mesh for that key has already been disposed.
    Insert {
        /// Chunk the mesh belongs to
        key: ChunkKey,
        /// The geometry to upload
        mesh: Rc<Mesh>,
    },
    /// Remove and free the mesh for `key`.
    Dispose {
        /// Chunk whose mesh should be dropped
        key: ChunkKey,
    },
}

/// Implemented by whatever owns the scene graph (camera, lights, materials).
pub trait RenderScene {
    /// Adds a chunk mesh to the scene.
    fn insert_mesh(&mut self, key: ChunkKey, mesh: Rc<Mesh>);

    /// Removes and disposes a chunk mesh.
    fn dispose_mesh(&mut self, key: ChunkKey);

    /// Applies one queued command.
    fn apply(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::Insert { key, mesh } => self.insert_mesh(key, mesh),
            SceneCommand::Dispose { key } => self.dispose_mesh(key),
        }
    }
}

/// A scene that only keeps track of which meshes are present.
///
/// Useful for headless runs and for checking that the world keeps the scene in
/// step with its chunks.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    meshes: std::collections::HashMap<ChunkKey, Rc<Mesh>>,
    /// Total number of inserts applied
    pub inserts: usize,
    /// Total number of disposals applied
    pub disposals: usize,
}

impl HeadlessScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// The mesh currently shown for `key`, if any.
    pub fn mesh(&self, key: ChunkKey) -> Option<&Rc<Mesh>> {
        self.meshes.get(&key)
    }

    /// Number of meshes currently in the scene.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether the scene holds no meshes.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Total faces across all meshes in the scene.
    pub fn face_count(&self) -> usize {
        self.meshes.values().map(|m| m.face_count()).sum()
    }
}

impl RenderScene for HeadlessScene {
    fn insert_mesh(&mut self, key: ChunkKey, mesh: Rc<Mesh>) {
        self.inserts += 1;
        self.meshes.insert(key, mesh);
    }

    fn dispose_mesh(&mut self, key: ChunkKey) {
        self.disposals += 1;
        self.meshes.remove(&key);
    }
}
