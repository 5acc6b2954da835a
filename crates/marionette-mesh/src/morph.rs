//! Morph target ("blend shape") storage.

use glam::{Vec2, Vec3};

use crate::error::MeshError;

/// One vertex's record within a morph target: position and normal deltas
/// from the base sub-mesh, plus one texture coordinate per channel.
///
/// Texture coordinates are stored absolute, not as deltas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlendVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub texture_coords: Vec<Vec2>,
}

/// An alternate shape for a sub-mesh, expressed as per-vertex deltas from
/// the base vertices. Blend vertices are indexed in parallel with the
/// sub-mesh vertices they modify.
#[derive(Debug, Clone, Default)]
pub struct MorphTarget {
    blend_vertices: Vec<BlendVertex>,
}

impl MorphTarget {
    /// Create an empty morph target with storage reserved for
    /// `vertex_count` blend vertices.
    pub fn with_capacity(vertex_count: usize) -> Result<Self, MeshError> {
        let mut blend_vertices = Vec::new();
        blend_vertices
            .try_reserve_exact(vertex_count)
            .map_err(|_| MeshError::Allocation {
                vertices: vertex_count,
            })?;
        Ok(Self { blend_vertices })
    }

    /// Append a blend vertex.
    pub fn push(&mut self, blend_vertex: BlendVertex) {
        self.blend_vertices.push(blend_vertex);
    }

    /// Get the blend vertex for the given vertex index.
    pub fn blend_vertex(&self, index: usize) -> Option<&BlendVertex> {
        self.blend_vertices.get(index)
    }

    pub fn blend_vertices(&self) -> &[BlendVertex] {
        &self.blend_vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.blend_vertices.len()
    }

    /// Multiply every delta position by `factor`.
    ///
    /// Normals are directions and texture coordinates are not spatial, so
    /// both are left unchanged.
    pub fn scale_positions(&mut self, factor: f32) {
        for blend_vertex in &mut self.blend_vertices {
            blend_vertex.position *= factor;
        }
    }

    /// Estimated memory footprint in bytes.
    pub fn size_bytes(&self) -> usize {
        std::mem::size_of::<Self>()
            + self
                .blend_vertices
                .iter()
                .map(|v| {
                    std::mem::size_of::<BlendVertex>()
                        + v.texture_coords.len() * std::mem::size_of::<Vec2>()
                })
                .sum::<usize>()
    }
}
