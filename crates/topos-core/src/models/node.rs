use serde::{Deserialize, Serialize};

use crate::constants::CONCEPT_NODE_TYPE;

/// A concept in the causal graph.
///
/// `id` is immutable once the node is inserted; every other field may be
/// updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Display label.
    pub label: String,
    /// Free-form type tag (e.g. "concept").
    pub node_type: String,
    /// Domain tag used for slice partitioning.
    pub domain: Option<String>,
    /// Initial embedding vector, fixed dimension when present.
    pub embedding: Option<Vec<f32>>,
    /// Display projection coordinates, owned by the visualization layer.
    pub projection: Option<Vec<f32>>,
    /// Opaque caller metadata.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Node {
    /// A concept node with no domain, embedding, or metadata.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type: CONCEPT_NODE_TYPE.to_string(),
            domain: None,
            embedding: None,
            projection: None,
            metadata: serde_json::Value::Null,
        }
    }

    /// Builder-style domain assignment.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Builder-style embedding assignment.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}
