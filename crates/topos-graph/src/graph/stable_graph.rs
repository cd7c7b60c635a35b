//! petgraph::StableGraph arena types.

use petgraph::stable_graph::StableGraph;
use petgraph::Directed;
use topos_core::models::{Edge, Node};

/// A node slot in the arena: the node plus its insertion sequence number.
#[derive(Debug, Clone)]
pub struct NodeEntry {
    pub node: Node,
    /// Monotonic insertion counter. Never reused, unlike arena indices.
    pub seq: u64,
}

/// The underlying directed graph type.
///
/// Each node keeps its own outgoing and incoming edge lists, so removals
/// cost O(degree) rather than O(graph).
pub type CausalStableGraph = StableGraph<NodeEntry, Edge, Directed>;
