//! Direct adjacency queries: neighbors, degrees, and connecting edges.
//!
//! Neighbor lists hold distinct node ids in insertion order. Degrees count
//! distinct neighbors, so parallel edges do not inflate them. Unknown ids
//! yield empty results.

pub mod ancestry;
pub mod paths;

use std::collections::HashSet;

use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use topos_core::models::{Edge, Node};

use crate::graph::CausalGraph;

impl CausalGraph {
    /// Targets of edges leaving `id`.
    pub fn out_neighbors(&self, id: &str) -> Vec<&str> {
        self.ids(self.neighbor_indices(id, &[Direction::Outgoing]))
    }

    /// Sources of edges entering `id`.
    pub fn in_neighbors(&self, id: &str) -> Vec<&str> {
        self.ids(self.neighbor_indices(id, &[Direction::Incoming]))
    }

    /// Union of in- and out-neighbors.
    pub fn all_neighbors(&self, id: &str) -> Vec<&str> {
        self.ids(self.neighbor_indices(id, &[Direction::Outgoing, Direction::Incoming]))
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.neighbor_indices(id, &[Direction::Outgoing]).len()
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.neighbor_indices(id, &[Direction::Incoming]).len()
    }

    /// In-degree plus out-degree.
    pub fn degree(&self, id: &str) -> usize {
        self.in_degree(id) + self.out_degree(id)
    }

    /// Edges from `source` to `target`, direction-sensitive.
    pub fn edges_between(&self, source: &str, target: &str) -> Vec<&Edge> {
        let (Some(s), Some(t)) = (self.index_of(source), self.index_of(target)) else {
            return Vec::new();
        };
        self.graph
            .edges_connecting(s, t)
            .map(|e| e.weight())
            .collect()
    }

    /// Every edge touching `id`, in either direction. Self-loops appear once.
    pub fn connected_edges(&self, id: &str) -> Vec<&Edge> {
        let Some(idx) = self.index_of(id) else {
            return Vec::new();
        };
        let mut seen: HashSet<EdgeIndex> = HashSet::new();
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .filter(|e| seen.insert(e.id()))
            .map(|e| e.weight())
            .collect()
    }

    /// Direct causes of `id` as nodes.
    pub fn find_causes(&self, id: &str) -> Vec<&Node> {
        self.nodes_of(self.neighbor_indices(id, &[Direction::Incoming]))
    }

    /// Direct effects of `id` as nodes.
    pub fn find_effects(&self, id: &str) -> Vec<&Node> {
        self.nodes_of(self.neighbor_indices(id, &[Direction::Outgoing]))
    }

    /// Distinct neighbor indices across `directions`, in insertion order.
    pub(crate) fn neighbor_indices(&self, id: &str, directions: &[Direction]) -> Vec<NodeIndex> {
        let Some(idx) = self.index_of(id) else {
            return Vec::new();
        };
        self.neighbors_of_index(idx, directions)
    }

    pub(crate) fn neighbors_of_index(
        &self,
        idx: NodeIndex,
        directions: &[Direction],
    ) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = directions
            .iter()
            .flat_map(|&dir| self.graph.neighbors_directed(idx, dir))
            .collect();
        neighbors.sort_by_key(|&n| self.entry(n).seq);
        neighbors.dedup();
        neighbors
    }

    pub(crate) fn ids(&self, indices: Vec<NodeIndex>) -> Vec<&str> {
        indices.into_iter().map(|idx| self.id_of(idx)).collect()
    }

    pub(crate) fn nodes_of(&self, indices: Vec<NodeIndex>) -> Vec<&Node> {
        indices
            .into_iter()
            .map(|idx| &self.entry(idx).node)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use topos_core::models::{Edge, Node, RelationKind};

    use super::*;

    fn diamond() -> CausalGraph {
        // a → b, a → c, b → d, c → d, plus a parallel a → b
        let mut graph = CausalGraph::new();
        for id in ["a", "b", "c", "d"] {
            graph.add_node(Node::new(id, id)).unwrap();
        }
        for (id, s, t, kind) in [
            ("ab", "a", "b", RelationKind::Causes),
            ("ac", "a", "c", RelationKind::Enables),
            ("bd", "b", "d", RelationKind::Increases),
            ("cd", "c", "d", RelationKind::Decreases),
            ("ab2", "a", "b", RelationKind::Amplifies),
        ] {
            graph.add_edge(Edge::new(id, s, t, kind)).unwrap();
        }
        graph
    }

    #[test]
    fn neighbors_are_distinct_and_ordered() {
        let graph = diamond();
        assert_eq!(graph.out_neighbors("a"), vec!["b", "c"]);
        assert_eq!(graph.in_neighbors("d"), vec!["b", "c"]);
        assert_eq!(graph.all_neighbors("b"), vec!["a", "d"]);
        assert!(graph.out_neighbors("missing").is_empty());
    }

    #[test]
    fn degrees_ignore_parallel_edges() {
        let graph = diamond();
        assert_eq!(graph.out_degree("a"), 2);
        assert_eq!(graph.in_degree("b"), 1);
        assert_eq!(graph.degree("b"), 2);
        assert_eq!(graph.degree("missing"), 0);
    }

    #[test]
    fn edges_between_is_direction_sensitive() {
        let graph = diamond();
        let mut ids: Vec<&str> = graph
            .edges_between("a", "b")
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["ab", "ab2"]);
        assert!(graph.edges_between("b", "a").is_empty());
    }

    #[test]
    fn connected_edges_covers_both_directions_once() {
        let mut graph = diamond();
        graph
            .add_edge(Edge::new("loop", "b", "b", RelationKind::Modulates))
            .unwrap();
        let mut ids: Vec<&str> = graph
            .connected_edges("b")
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["ab", "ab2", "bd", "loop"]);
    }

    #[test]
    fn causes_and_effects_are_direct_neighbors() {
        let graph = diamond();
        let causes: Vec<&str> = graph.find_causes("d").iter().map(|n| n.id.as_str()).collect();
        let effects: Vec<&str> = graph.find_effects("a").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(causes, vec!["b", "c"]);
        assert_eq!(effects, vec!["b", "c"]);
    }
}
