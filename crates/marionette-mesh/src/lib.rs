//! Marionette Mesh - Core mesh data for the Marionette animation library
//!
//! Provides the design-time mesh representation shared by all runtime
//! instances of a model: sub-meshes holding vertices, per-channel texture
//! coordinates and faces, plus morph targets ("blend shapes") stored as
//! per-vertex deltas from the base mesh.

mod error;
mod mesh;
mod morph;
mod submesh;

pub use error::MeshError;
pub use mesh::CoreMesh;
pub use morph::{BlendVertex, MorphTarget};
pub use submesh::{CoreSubmesh, Face, Vertex};

pub use glam::{Vec2, Vec3};
