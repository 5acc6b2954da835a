//! Sub-mesh storage: vertices, texture coordinates, faces, and morph
//! targets.

use glam::{Vec2, Vec3};

use crate::error::MeshError;
use crate::morph::MorphTarget;

/// A single mesh vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// A triangle face, as three vertex indices.
pub type Face = [u32; 3];

/// A partition of a mesh's vertices and faces, typically grouped by
/// material.
///
/// Texture coordinates are stored per channel; every channel holds exactly
/// one coordinate per vertex.
#[derive(Debug, Clone, Default)]
pub struct CoreSubmesh {
    vertices: Vec<Vertex>,
    texture_channels: Vec<Vec<Vec2>>,
    faces: Vec<Face>,
    material_id: usize,
    morph_targets: Vec<MorphTarget>,
}

impl CoreSubmesh {
    /// Create an empty sub-mesh with the given number of texture channels.
    pub fn new(texture_channel_count: usize) -> Self {
        Self {
            vertices: Vec::new(),
            texture_channels: vec![Vec::new(); texture_channel_count],
            faces: Vec::new(),
            material_id: 0,
            morph_targets: Vec::new(),
        }
    }

    /// Build a sub-mesh from prepared vertex, texture coordinate, and face
    /// data. Every texture channel must hold one coordinate per vertex.
    pub fn from_parts(
        vertices: Vec<Vertex>,
        texture_channels: Vec<Vec<Vec2>>,
        faces: Vec<Face>,
    ) -> Result<Self, MeshError> {
        for (channel, coords) in texture_channels.iter().enumerate() {
            if coords.len() != vertices.len() {
                return Err(MeshError::TopologyMismatch(format!(
                    "texture channel {} has {} coordinates for {} vertices",
                    channel,
                    coords.len(),
                    vertices.len()
                )));
            }
        }
        Ok(Self {
            vertices,
            texture_channels,
            faces,
            material_id: 0,
            morph_targets: Vec::new(),
        })
    }

    /// Append a vertex together with one texture coordinate per channel.
    /// Returns the new vertex's index.
    pub fn push_vertex(&mut self, vertex: Vertex, coords: &[Vec2]) -> Result<usize, MeshError> {
        if coords.len() != self.texture_channels.len() {
            return Err(MeshError::TopologyMismatch(format!(
                "got {} texture coordinates for {} channels",
                coords.len(),
                self.texture_channels.len()
            )));
        }
        let index = self.vertices.len();
        self.vertices.push(vertex);
        for (channel, coord) in self.texture_channels.iter_mut().zip(coords) {
            channel.push(*coord);
        }
        Ok(index)
    }

    /// Append a triangle face.
    pub fn push_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn texture_channel_count(&self) -> usize {
        self.texture_channels.len()
    }

    /// Texture coordinates for one channel, indexed in parallel with the
    /// vertices.
    pub fn texture_coords(&self, channel: usize) -> Option<&[Vec2]> {
        self.texture_channels.get(channel).map(|c| c.as_slice())
    }

    pub fn material_id(&self) -> usize {
        self.material_id
    }

    pub fn set_material_id(&mut self, material_id: usize) {
        self.material_id = material_id;
    }

    /// Append a morph target. The target must hold one blend vertex per
    /// sub-mesh vertex. Returns the target's id (its index in the list).
    pub fn add_morph_target(&mut self, target: MorphTarget) -> Result<usize, MeshError> {
        if target.vertex_count() != self.vertices.len() {
            return Err(MeshError::TopologyMismatch(format!(
                "morph target has {} blend vertices for {} vertices",
                target.vertex_count(),
                self.vertices.len()
            )));
        }
        let id = self.morph_targets.len();
        self.morph_targets.push(target);
        Ok(id)
    }

    pub fn morph_target(&self, id: usize) -> Option<&MorphTarget> {
        self.morph_targets.get(id)
    }

    pub fn morph_targets(&self) -> &[MorphTarget] {
        &self.morph_targets
    }

    pub fn morph_target_count(&self) -> usize {
        self.morph_targets.len()
    }

    /// Uniformly scale the sub-mesh in place.
    ///
    /// Vertex positions and stored morph-target delta positions are
    /// spatial and get multiplied; normals and texture coordinates are
    /// unchanged.
    pub fn scale(&mut self, factor: f32) {
        for vertex in &mut self.vertices {
            vertex.position *= factor;
        }
        for target in &mut self.morph_targets {
            target.scale_positions(factor);
        }
    }

    /// Estimated memory footprint in bytes.
    pub fn size_bytes(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.vertices.len() * std::mem::size_of::<Vertex>()
            + self
                .texture_channels
                .iter()
                .map(|c| c.len() * std::mem::size_of::<Vec2>())
                .sum::<usize>()
            + self.faces.len() * std::mem::size_of::<Face>()
            + self
                .morph_targets
                .iter()
                .map(MorphTarget::size_bytes)
                .sum::<usize>()
    }
}
