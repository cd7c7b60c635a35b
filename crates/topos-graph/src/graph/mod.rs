//! CausalGraph: node/edge store with id indices and an analytics cache.

pub mod pruning;
pub mod stable_graph;

use std::collections::{BTreeMap, HashMap};

use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use topos_core::errors::{GraphError, ToposError, ToposResult};
use topos_core::models::{Edge, Node};
use tracing::debug;

use crate::analytics::GraphAnalytics;

pub use stable_graph::{CausalStableGraph, NodeEntry};

/// A mutable, directed, typed causal graph.
///
/// Single-writer: callers serialize structural mutations against reads.
/// Every structural mutation bumps [`CausalGraph::generation`] and drops the
/// cached analytics.
#[derive(Debug, Default)]
pub struct CausalGraph {
    pub(crate) graph: CausalStableGraph,
    node_index: HashMap<String, NodeIndex>,
    edge_index: HashMap<String, EdgeIndex>,
    /// seq → index, i.e. nodes in insertion order.
    order: BTreeMap<u64, NodeIndex>,
    next_seq: u64,
    generation: u64,
    pub(crate) analytics: Option<GraphAnalytics>,
}

impl CausalGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Mutation ---

    /// Insert a node. Fails if the id is already present.
    pub fn add_node(&mut self, node: Node) -> ToposResult<()> {
        if self.node_index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode { id: node.id }.into());
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = node.id.clone();
        let idx = self.graph.add_node(NodeEntry { node, seq });
        self.node_index.insert(id.clone(), idx);
        self.order.insert(seq, idx);
        self.invalidate();
        debug!(node_id = %id, seq, "node added");
        Ok(())
    }

    /// Insert an edge.
    ///
    /// Fails if the id is already present, the confidence lies outside
    /// [0, 1], or either endpoint is missing. A rejected edge leaves the
    /// graph untouched.
    pub fn add_edge(&mut self, edge: Edge) -> ToposResult<()> {
        if self.edge_index.contains_key(&edge.id) {
            return Err(GraphError::DuplicateEdge { id: edge.id }.into());
        }
        if let Some(value) = edge.confidence.filter(|_| !edge.has_valid_confidence()) {
            return Err(GraphError::InvalidConfidence {
                edge_id: edge.id,
                value,
            }
            .into());
        }
        let source = self.require_endpoint(&edge, &edge.source)?;
        let target = self.require_endpoint(&edge, &edge.target)?;

        let id = edge.id.clone();
        debug!(edge_id = %id, source = %edge.source, target = %edge.target, relation = %edge.relation, "edge added");
        let idx = self.graph.add_edge(source, target, edge);
        self.edge_index.insert(id, idx);
        self.invalidate();
        Ok(())
    }

    /// Remove a node and every edge touching it. No-op if absent.
    ///
    /// Returns the removed node.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let idx = self.node_index.remove(id)?;

        let incident: Vec<EdgeIndex> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .map(|e| e.id())
            .collect();
        for edge_idx in incident {
            if let Some(edge) = self.graph.remove_edge(edge_idx) {
                self.edge_index.remove(&edge.id);
            }
        }

        let entry = self.graph.remove_node(idx)?;
        self.order.remove(&entry.seq);
        self.invalidate();
        debug!(node_id = %id, "node removed");
        Some(entry.node)
    }

    /// Remove an edge. No-op if absent.
    pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        let idx = self.edge_index.remove(id)?;
        let edge = self.graph.remove_edge(idx)?;
        self.invalidate();
        debug!(edge_id = %id, "edge removed");
        Some(edge)
    }

    /// Set or clear a node's domain tag. Not a structural mutation.
    pub fn set_domain(&mut self, id: &str, domain: Option<String>) -> ToposResult<()> {
        self.require_node_mut(id)?.domain = domain;
        Ok(())
    }

    /// Set or clear a node's embedding. Not a structural mutation; dimension
    /// checks belong to the consumer that fixes the dimension.
    pub fn set_embedding(&mut self, id: &str, embedding: Option<Vec<f32>>) -> ToposResult<()> {
        self.require_node_mut(id)?.embedding = embedding;
        Ok(())
    }

    /// Set or clear a node's display projection.
    pub fn set_projection(&mut self, id: &str, projection: Option<Vec<f32>>) -> ToposResult<()> {
        self.require_node_mut(id)?.projection = projection;
        Ok(())
    }

    // --- Lookup ---

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
            .map(|entry| &entry.node)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edge_index
            .get(id)
            .and_then(|&idx| self.graph.edge_weight(idx))
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edge_index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.order
            .values()
            .filter_map(|&idx| self.graph.node_weight(idx))
            .map(|entry| &entry.node)
    }

    /// All edges in arena order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.graph
            .edge_indices()
            .filter_map(|idx| self.graph.edge_weight(idx))
    }

    /// Counter bumped by every structural mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // --- Crate-internal index helpers ---

    pub(crate) fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    pub(crate) fn entry(&self, idx: NodeIndex) -> &NodeEntry {
        &self.graph[idx]
    }

    pub(crate) fn id_of(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].node.id
    }

    /// Node indices in insertion order.
    pub(crate) fn ordered_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.order.values().copied()
    }

    fn require_endpoint(&self, edge: &Edge, node_id: &str) -> ToposResult<NodeIndex> {
        self.index_of(node_id).ok_or_else(|| {
            GraphError::MissingEndpoint {
                edge_id: edge.id.clone(),
                node_id: node_id.to_string(),
            }
            .into()
        })
    }

    /// Only the setters above reach this, so node ids stay fixed.
    fn require_node_mut(&mut self, id: &str) -> ToposResult<&mut Node> {
        self.node_index
            .get(id)
            .copied()
            .and_then(|idx| self.graph.node_weight_mut(idx))
            .map(|entry| &mut entry.node)
            .ok_or_else(|| ToposError::NodeNotFound { id: id.to_string() })
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.analytics = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topos_core::models::RelationKind;

    fn graph_with(ids: &[&str]) -> CausalGraph {
        let mut graph = CausalGraph::new();
        for id in ids {
            graph.add_node(Node::new(*id, id.to_uppercase())).unwrap();
        }
        graph
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let mut graph = graph_with(&["a"]);
        let err = graph.add_node(Node::new("a", "again")).unwrap_err();
        assert!(matches!(err, ToposError::Graph(GraphError::DuplicateNode { .. })));
        assert_eq!(graph.node("a").unwrap().label, "A");
    }

    #[test]
    fn edge_with_missing_endpoint_leaves_graph_unchanged() {
        let mut graph = graph_with(&["a"]);
        let before = graph.generation();
        let err = graph
            .add_edge(Edge::new("e1", "a", "ghost", RelationKind::Causes))
            .unwrap_err();
        assert!(matches!(
            err,
            ToposError::Graph(GraphError::MissingEndpoint { ref node_id, .. }) if node_id == "ghost"
        ));
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.contains_edge("e1"));
        assert_eq!(graph.generation(), before);
    }

    #[test]
    fn duplicate_edge_and_bad_confidence_are_rejected() {
        let mut graph = graph_with(&["a", "b"]);
        graph
            .add_edge(Edge::new("e1", "a", "b", RelationKind::Causes))
            .unwrap();
        assert!(graph
            .add_edge(Edge::new("e1", "b", "a", RelationKind::Causes))
            .is_err());
        let err = graph
            .add_edge(Edge::new("e2", "a", "b", RelationKind::Causes).with_confidence(1.5))
            .unwrap_err();
        assert!(matches!(err, ToposError::Graph(GraphError::InvalidConfidence { .. })));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn remove_node_cascades_edges_and_index() {
        let mut graph = graph_with(&["a", "b", "c"]);
        graph
            .add_edge(Edge::new("ab", "a", "b", RelationKind::Causes))
            .unwrap();
        graph
            .add_edge(Edge::new("cb", "c", "b", RelationKind::Enables))
            .unwrap();
        graph
            .add_edge(Edge::new("ac", "a", "c", RelationKind::Triggers))
            .unwrap();

        let removed = graph.remove_node("b").unwrap();
        assert_eq!(removed.id, "b");
        assert!(!graph.contains_edge("ab"));
        assert!(!graph.contains_edge("cb"));
        assert!(graph.contains_edge("ac"));
        assert!(graph.edges().all(|e| !e.touches("b")));
        assert!(graph.remove_node("b").is_none());
    }

    #[test]
    fn removal_of_missing_ids_is_a_no_op() {
        let mut graph = graph_with(&["a"]);
        let before = graph.generation();
        assert!(graph.remove_edge("nope").is_none());
        assert!(graph.remove_node("nope").is_none());
        assert_eq!(graph.generation(), before);
    }

    #[test]
    fn nodes_iterate_in_insertion_order_after_slot_reuse() {
        let mut graph = graph_with(&["a", "b", "c"]);
        graph.remove_node("a");
        graph.add_node(Node::new("d", "D")).unwrap();
        let ids: Vec<&str> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "d"]);
    }

    #[test]
    fn in_place_updates_do_not_bump_generation() {
        let mut graph = graph_with(&["a"]);
        let before = graph.generation();
        graph.set_domain("a", Some("econ".to_string())).unwrap();
        graph.set_embedding("a", Some(vec![1.0, 2.0])).unwrap();
        assert_eq!(graph.generation(), before);
        assert_eq!(graph.node("a").unwrap().domain.as_deref(), Some("econ"));
        assert!(matches!(
            graph.set_domain("zzz", None),
            Err(ToposError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn setters_keep_ids_and_index_in_sync() {
        let mut graph = graph_with(&["a", "b"]);
        graph.set_domain("a", Some("econ".to_string())).unwrap();
        graph.set_projection("a", Some(vec![0.5, 0.5])).unwrap();
        graph.set_embedding("b", Some(vec![1.0])).unwrap();

        let a = graph.node("a").unwrap();
        assert_eq!(a.id, "a");
        assert_eq!(a.projection.as_deref(), Some(&[0.5, 0.5][..]));
        assert_eq!(graph.node("b").unwrap().id, "b");
        assert!(matches!(
            graph.set_projection("zzz", None),
            Err(ToposError::NodeNotFound { .. })
        ));
        assert!(matches!(
            graph.set_embedding("zzz", None),
            Err(ToposError::NodeNotFound { .. })
        ));
    }
}
