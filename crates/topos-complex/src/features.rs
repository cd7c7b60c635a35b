//! Structural features for 1-simplices (edges) and 2-simplices (triangles).

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use topos_core::constants::TRIANGLE_DIRECTED_PAIRS;
use topos_core::models::{Edge, RelationKind};
use topos_graph::{CausalGraph, Triangle};

/// Features of one edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeFeatures {
    pub edge_id: String,
    /// Total degree of the source node.
    pub source_degree: usize,
    /// Total degree of the target node.
    pub target_degree: usize,
    /// Nodes adjacent (either direction) to both endpoints.
    pub common_neighbors: usize,
    /// Jaccard coefficient of the endpoints' neighbor sets.
    pub jaccard: f64,
    pub relation_one_hot: [f32; RelationKind::COUNT],
}

/// Features of one triangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleFeatures {
    pub triangle: Triangle,
    pub degree_sum: usize,
    pub degree_avg: f64,
    /// Ordered vertex pairs joined by at least one edge, over 6.
    pub transitivity: f64,
    /// 1 when all three share a domain tag, 1/k for k distinct tags. A
    /// missing tag counts as its own value.
    pub domain_homogeneity: f64,
    pub relation_kinds: BTreeSet<RelationKind>,
}

/// Undirected neighbor set of `id`, without `id` itself.
pub(crate) fn neighbor_set<'a>(graph: &'a CausalGraph, id: &str) -> HashSet<&'a str> {
    graph
        .all_neighbors(id)
        .into_iter()
        .filter(|n| *n != id)
        .collect()
}

pub fn edge_features(graph: &CausalGraph, edge: &Edge) -> EdgeFeatures {
    let source_neighbors = neighbor_set(graph, &edge.source);
    let target_neighbors = neighbor_set(graph, &edge.target);
    let common = source_neighbors.intersection(&target_neighbors).count();
    let union = source_neighbors.union(&target_neighbors).count();

    EdgeFeatures {
        edge_id: edge.id.clone(),
        source_degree: graph.degree(&edge.source),
        target_degree: graph.degree(&edge.target),
        common_neighbors: common,
        jaccard: if union == 0 {
            0.0
        } else {
            common as f64 / union as f64
        },
        relation_one_hot: edge.relation.one_hot(),
    }
}

pub fn triangle_features(graph: &CausalGraph, triangle: &Triangle) -> TriangleFeatures {
    let degree_sum: usize = triangle.vertices.iter().map(|v| graph.degree(v)).sum();

    let mut directed_pairs = 0;
    let mut relation_kinds = BTreeSet::new();
    for (a, b) in triangle.pairs() {
        for (from, to) in [(a, b), (b, a)] {
            let edges = graph.edges_between(from, to);
            if !edges.is_empty() {
                directed_pairs += 1;
            }
            relation_kinds.extend(edges.iter().map(|e| e.relation));
        }
    }

    let domains: HashSet<Option<&str>> = triangle
        .vertices
        .iter()
        .map(|v| graph.node(v).and_then(|n| n.domain.as_deref()))
        .collect();

    TriangleFeatures {
        triangle: triangle.clone(),
        degree_sum,
        degree_avg: degree_sum as f64 / 3.0,
        transitivity: directed_pairs as f64 / TRIANGLE_DIRECTED_PAIRS as f64,
        domain_homogeneity: 1.0 / domains.len() as f64,
        relation_kinds,
    }
}
