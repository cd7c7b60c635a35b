//! Dense index view of the graph used by the analytics passes.

use std::collections::HashMap;

use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;

use crate::graph::CausalGraph;

/// Nodes renumbered 0..n in insertion order with distinct-neighbor lists.
pub(crate) struct Topology {
    pub ids: Vec<String>,
    pub out: Vec<Vec<usize>>,
    pub inc: Vec<Vec<usize>>,
    /// Undirected neighbors, self excluded.
    pub undirected: Vec<Vec<usize>>,
}

impl Topology {
    pub fn from_graph(graph: &CausalGraph) -> Self {
        let indices: Vec<NodeIndex> = graph.ordered_indices().collect();
        let position: HashMap<NodeIndex, usize> =
            indices.iter().enumerate().map(|(i, &idx)| (idx, i)).collect();

        let map = |list: Vec<NodeIndex>| -> Vec<usize> {
            list.into_iter().filter_map(|n| position.get(&n).copied()).collect()
        };

        let mut out = Vec::with_capacity(indices.len());
        let mut inc = Vec::with_capacity(indices.len());
        let mut undirected = Vec::with_capacity(indices.len());
        for (i, &idx) in indices.iter().enumerate() {
            out.push(map(graph.neighbors_of_index(idx, &[Direction::Outgoing])));
            inc.push(map(graph.neighbors_of_index(idx, &[Direction::Incoming])));
            let mut both = map(graph.neighbors_of_index(
                idx,
                &[Direction::Outgoing, Direction::Incoming],
            ));
            both.retain(|&j| j != i);
            undirected.push(both);
        }

        Self {
            ids: indices.iter().map(|&idx| graph.id_of(idx).to_string()).collect(),
            out,
            inc,
            undirected,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Pair each score with its node id.
    pub fn keyed(&self, scores: Vec<f64>) -> HashMap<String, f64> {
        self.ids.iter().cloned().zip(scores).collect()
    }
}
