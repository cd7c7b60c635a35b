mod config_error;
mod embedding_error;
mod graph_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use graph_error::GraphError;

/// Convenience alias used by every fallible operation in the workspace.
pub type ToposResult<T> = Result<T, ToposError>;

/// Top-level error for the Topos workspace.
///
/// Structural violations are surfaced immediately and never corrected
/// silently. Nothing in the core retries.
#[derive(Debug, thiserror::Error)]
pub enum ToposError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("node not found: {id}")]
    NodeNotFound { id: String },

    #[error("slice not found for domain: {domain}")]
    SliceNotFound { domain: String },

    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ToposError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl ToposError {
    /// Whether this error is a validation failure on caller-supplied input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Graph(_)
                | Self::Embedding(EmbeddingError::DimensionMismatch { .. })
                | Self::Config(ConfigError::ValidationFailed { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_errors_convert_and_render() {
        let err: ToposError = GraphError::DuplicateNode {
            id: "a".to_string(),
        }
        .into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "graph error: duplicate node id: a");
    }

    #[test]
    fn missing_slice_is_not_a_validation_error() {
        let err = ToposError::SliceNotFound {
            domain: "econ".to_string(),
        };
        assert!(!err.is_validation());
        assert!(err.to_string().contains("econ"));
    }
}
