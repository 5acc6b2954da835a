/// Errors that can occur while manipulating core mesh data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("invalid submesh id {id} (submesh count {count})")]
    InvalidHandle { id: usize, count: usize },

    #[error("topology mismatch: {0}")]
    TopologyMismatch(String),

    #[error("failed to reserve morph target storage for {vertices} vertices")]
    Allocation { vertices: usize },
}
