use serde::{Deserialize, Serialize};
use topos_core::models::Edge;

/// The nodes sharing one domain tag and the edges internal to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToposSlice {
    pub domain: String,
    /// Node ids in graph insertion order.
    pub objects: Vec<String>,
    /// Edges whose endpoints both carry `domain`.
    pub morphisms: Vec<Edge>,
}

impl ToposSlice {
    pub fn contains(&self, node_id: &str) -> bool {
        self.objects.iter().any(|id| id == node_id)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn morphism_count(&self) -> usize {
        self.morphisms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
