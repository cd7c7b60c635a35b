//! Local and global clustering coefficients, treating edges as undirected.

use topos_graph::CausalGraph;

use crate::features::neighbor_set;

/// Connected neighbor pairs over C(k, 2). Zero for fewer than two neighbors.
pub fn local_clustering(graph: &CausalGraph, id: &str) -> f64 {
    let neighbors: Vec<&str> = graph
        .all_neighbors(id)
        .into_iter()
        .filter(|n| *n != id)
        .collect();
    let k = neighbors.len();
    if k < 2 {
        return 0.0;
    }

    let mut linked = 0usize;
    for (i, a) in neighbors.iter().enumerate() {
        let around_a = neighbor_set(graph, a);
        linked += neighbors[i + 1..]
            .iter()
            .filter(|b| around_a.contains(**b))
            .count();
    }
    linked as f64 / (k * (k - 1) / 2) as f64
}

/// Mean local clustering over every node. Zero for an empty graph.
pub fn global_clustering(graph: &CausalGraph) -> f64 {
    let n = graph.node_count();
    if n == 0 {
        return 0.0;
    }
    graph
        .nodes()
        .map(|node| local_clustering(graph, &node.id))
        .sum::<f64>()
        / n as f64
}

#[cfg(test)]
mod tests {
    use topos_core::models::{Edge, Node, RelationKind};

    use super::*;

    #[test]
    fn star_with_one_chord() {
        let mut graph = CausalGraph::new();
        for id in ["hub", "x", "y", "z"] {
            graph.add_node(Node::new(id, id)).unwrap();
        }
        for (id, s, t) in [("1", "hub", "x"), ("2", "y", "hub"), ("3", "hub", "z"), ("4", "x", "y")] {
            graph.add_edge(Edge::new(id, s, t, RelationKind::Causes)).unwrap();
        }
        // hub has 3 neighbors, one linked pair (x, y).
        assert!((local_clustering(&graph, "hub") - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(local_clustering(&graph, "x"), 1.0);
        assert_eq!(local_clustering(&graph, "z"), 0.0);
        let expected = (1.0 / 3.0 + 1.0 + 1.0 + 0.0) / 4.0;
        assert!((global_clustering(&graph) - expected).abs() < 1e-12);
    }

    #[test]
    fn empty_graph_is_zero() {
        assert_eq!(global_clustering(&CausalGraph::new()), 0.0);
    }
}
