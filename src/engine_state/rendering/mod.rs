//! # Rendering Boundary
//!
//! Everything the engine hands to the rendering collaborator: chunk meshes, the
//! vertex format they are built from, and the scene commands that keep the
//! collaborator's scene graph in sync with the loaded chunks.
//!
//! Cameras, lights, materials and shaders live on the other side of
//! [`scene::RenderScene`] and are not modelled here.

pub mod meshing;
pub mod scene;
mod vertex;

pub use scene::{HeadlessScene, RenderScene, SceneCommand};
pub use vertex::Vertex;
