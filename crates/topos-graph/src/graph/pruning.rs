//! Prune low-confidence edges as a correction pass.

use tracing::info;

use super::CausalGraph;

/// Result of a pruning pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneResult {
    /// Ids of the removed edges.
    pub removed_edge_ids: Vec<String>,
}

impl PruneResult {
    pub fn edges_removed(&self) -> usize {
        self.removed_edge_ids.len()
    }
}

impl CausalGraph {
    /// Remove every edge whose confidence is below `min_confidence`.
    /// Edges without a confidence are kept. Nodes are never removed.
    pub fn prune_weak_edges(&mut self, min_confidence: f64) -> PruneResult {
        let weak: Vec<String> = self
            .edges()
            .filter(|e| e.confidence.is_some_and(|c| c < min_confidence))
            .map(|e| e.id.clone())
            .collect();

        for id in &weak {
            self.remove_edge(id);
        }

        info!(
            min_confidence,
            edges_removed = weak.len(),
            "pruned weak edges"
        );
        PruneResult {
            removed_edge_ids: weak,
        }
    }
}

#[cfg(test)]
mod tests {
    use topos_core::models::{Edge, Node, RelationKind};

    use super::*;

    #[test]
    fn prunes_only_edges_below_threshold() {
        let mut graph = CausalGraph::new();
        for id in ["a", "b", "c"] {
            graph.add_node(Node::new(id, id)).unwrap();
        }
        graph
            .add_edge(Edge::new("weak", "a", "b", RelationKind::Causes).with_confidence(0.1))
            .unwrap();
        graph
            .add_edge(Edge::new("strong", "b", "c", RelationKind::Causes).with_confidence(0.9))
            .unwrap();
        graph
            .add_edge(Edge::new("unscored", "a", "c", RelationKind::Causes))
            .unwrap();

        let result = graph.prune_weak_edges(0.5);
        assert_eq!(result.removed_edge_ids, vec!["weak".to_string()]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.node_count(), 3);
    }
}
