//! The core mesh: an ordered collection of sub-meshes with morph-target
//! derivation.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::MeshError;
use crate::morph::{BlendVertex, MorphTarget};
use crate::submesh::CoreSubmesh;

/// The design-time (unposed) mesh of a model: an ordered collection of
/// owned sub-meshes, addressed by positional id.
///
/// Ids are assigned at insertion and stay stable: removing a sub-mesh
/// vacates its slot instead of compacting the collection, so
/// [`submesh_count`](Self::submesh_count) never decreases.
#[derive(Debug, Clone, Default)]
pub struct CoreMesh {
    submeshes: Vec<Option<CoreSubmesh>>,
    morph_target_ids: HashMap<String, usize>,
    filename: Option<String>,
    name: Option<String>,
}

impl CoreMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sub-mesh, taking ownership. Returns its id.
    pub fn add_submesh(&mut self, submesh: CoreSubmesh) -> usize {
        let id = self.submeshes.len();
        self.submeshes.push(Some(submesh));
        id
    }

    /// Remove the sub-mesh with the given id, returning it.
    ///
    /// The slot stays vacant; ids of other sub-meshes are unaffected and
    /// the slot count does not shrink.
    pub fn remove_submesh(&mut self, id: usize) -> Result<CoreSubmesh, MeshError> {
        let count = self.submeshes.len();
        self.submeshes
            .get_mut(id)
            .and_then(|slot| slot.take())
            .ok_or(MeshError::InvalidHandle { id, count })
    }

    /// Look up a sub-mesh by id. Fails for ids out of range and for
    /// vacated slots.
    pub fn submesh(&self, id: usize) -> Result<&CoreSubmesh, MeshError> {
        let count = self.submeshes.len();
        self.submeshes
            .get(id)
            .and_then(|slot| slot.as_ref())
            .ok_or(MeshError::InvalidHandle { id, count })
    }

    /// Look up a sub-mesh by id, mutably.
    pub fn submesh_mut(&mut self, id: usize) -> Result<&mut CoreSubmesh, MeshError> {
        let count = self.submeshes.len();
        self.submeshes
            .get_mut(id)
            .and_then(|slot| slot.as_mut())
            .ok_or(MeshError::InvalidHandle { id, count })
    }

    /// Number of sub-mesh slots, vacated slots included.
    pub fn submesh_count(&self) -> usize {
        self.submeshes.len()
    }

    /// Iterate over occupied slots as `(id, submesh)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &CoreSubmesh)> {
        self.submeshes
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|submesh| (id, submesh)))
    }

    /// Uniformly scale every sub-mesh in place.
    pub fn scale(&mut self, factor: f32) {
        for submesh in self.submeshes.iter_mut().flatten() {
            submesh.scale(factor);
        }
    }

    /// Derive a morph target from `other` and append it to every occupied
    /// sub-mesh, recording it under `name`.
    ///
    /// `other` must have the same slot count, the same slot occupancy, and
    /// the same vertex count in every corresponding sub-mesh pair. Delta
    /// positions and normals are `other` minus `self`; texture coordinates
    /// are copied from `other` as-is. No sub-mesh is mutated unless the
    /// whole operation succeeds.
    ///
    /// Returns the new morph target's id.
    pub fn add_as_morph_target(
        &mut self,
        other: &CoreMesh,
        name: &str,
    ) -> Result<usize, MeshError> {
        if self.submeshes.len() != other.submeshes.len() {
            return Err(MeshError::TopologyMismatch(format!(
                "submesh count differs: {} vs {}",
                self.submeshes.len(),
                other.submeshes.len()
            )));
        }
        let morph_target_id = match self.iter().next() {
            Some((_, submesh)) => submesh.morph_target_count(),
            None => {
                return Err(MeshError::TopologyMismatch(
                    "mesh has no submeshes".to_string(),
                ))
            }
        };

        for (id, (own, their)) in self.submeshes.iter().zip(&other.submeshes).enumerate() {
            match (own, their) {
                (None, None) => {}
                (Some(own), Some(their)) => {
                    if own.vertex_count() != their.vertex_count() {
                        return Err(MeshError::TopologyMismatch(format!(
                            "submesh {}: vertex count differs: {} vs {}",
                            id,
                            own.vertex_count(),
                            their.vertex_count()
                        )));
                    }
                }
                _ => {
                    return Err(MeshError::TopologyMismatch(format!(
                        "submesh {} is vacant in only one mesh",
                        id
                    )));
                }
            }
        }

        // Build every record up front so a failure mutates no sub-mesh.
        let mut derived = Vec::new();
        for (id, (own, their)) in self.submeshes.iter().zip(&other.submeshes).enumerate() {
            let (Some(own), Some(their)) = (own.as_ref(), their.as_ref()) else {
                continue;
            };
            let mut target = MorphTarget::with_capacity(own.vertex_count())?;
            for (i, (own_vertex, their_vertex)) in
                own.vertices().iter().zip(their.vertices()).enumerate()
            {
                let texture_coords = (0..their.texture_channel_count())
                    .filter_map(|channel| their.texture_coords(channel))
                    .map(|coords| coords[i])
                    .collect();
                target.push(BlendVertex {
                    position: their_vertex.position - own_vertex.position,
                    normal: their_vertex.normal - own_vertex.normal,
                    // Coordinates are stored absolute, not as deltas.
                    texture_coords,
                });
            }
            derived.push((id, target));
        }

        for (id, target) in derived {
            self.submesh_mut(id)?.add_morph_target(target)?;
        }

        if let Some(previous) = self
            .morph_target_ids
            .insert(name.to_string(), morph_target_id)
        {
            warn!(
                "Morph target name '{}' redefined (was id {})",
                name, previous
            );
        }
        debug!(
            "Derived morph target '{}' (id {}) across {} submeshes",
            name,
            morph_target_id,
            self.iter().count()
        );

        Ok(morph_target_id)
    }

    /// Look up a morph target id by name. Returns `None` for names no
    /// morph target was recorded under.
    pub fn morph_target_id(&self, name: &str) -> Option<usize> {
        self.morph_target_ids.get(name).copied()
    }

    /// Set the path of the file this mesh was loaded from, if any.
    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = Some(filename.into());
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Set the symbolic name of the mesh.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Estimated memory footprint in bytes.
    pub fn size_bytes(&self) -> usize {
        std::mem::size_of::<Self>()
            + self
                .submeshes
                .iter()
                .flatten()
                .map(CoreSubmesh::size_bytes)
                .sum::<usize>()
    }
}
