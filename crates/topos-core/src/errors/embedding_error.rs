/// Embedding refinement errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("dimension mismatch for node {node_id}: expected {expected}, got {actual}")]
    DimensionMismatch {
        node_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid refiner configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("refiner weights have been disposed")]
    Disposed,
}
