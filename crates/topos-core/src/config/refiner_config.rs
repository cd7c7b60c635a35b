use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding refiner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinerConfig {
    /// Dimension of every input and output embedding.
    pub embedding_dim: usize,
    /// Hidden width of the position-wise feed-forward layer.
    pub hidden_dim: usize,
    /// Attention heads per block. Must divide `embedding_dim`.
    pub num_heads: usize,
    /// Transformer blocks per stack (edge stack and triangle stack).
    pub num_layers: usize,
    /// Carried for compatibility with exported settings. Never applied in the
    /// forward computation.
    pub dropout: f32,
    /// Apply layer normalization after each residual connection.
    pub use_layer_norm: bool,
    /// Seed for weight initialization.
    pub seed: u64,
}

impl Default for RefinerConfig {
    fn default() -> Self {
        Self {
            embedding_dim: defaults::DEFAULT_EMBEDDING_DIM,
            hidden_dim: defaults::DEFAULT_HIDDEN_DIM,
            num_heads: defaults::DEFAULT_NUM_HEADS,
            num_layers: defaults::DEFAULT_NUM_LAYERS,
            dropout: defaults::DEFAULT_DROPOUT,
            use_layer_norm: defaults::DEFAULT_USE_LAYER_NORM,
            seed: defaults::DEFAULT_REFINER_SEED,
        }
    }
}
