//! Annotated export for downstream visualization.

use serde::{Deserialize, Serialize};
use topos_core::models::{Edge, Node};

use crate::graph::CausalGraph;

/// A node annotated with its degrees and, when analytics are cached, its
/// centrality scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedNode {
    #[serde(flatten)]
    pub node: Node,
    pub in_degree: usize,
    pub out_degree: usize,
    pub degree: usize,
    pub pagerank: Option<f64>,
    pub betweenness: Option<f64>,
    pub closeness: Option<f64>,
}

/// Full node/edge listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub generation: u64,
    pub nodes: Vec<AnnotatedNode>,
    pub edges: Vec<Edge>,
}

/// Headline counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Edges over the n(n-1) possible directed pairs.
    pub density: f64,
}

impl CausalGraph {
    /// Snapshot of every node and edge. Centrality fields are `None` unless
    /// analytics are cached for the current generation.
    pub fn snapshot(&self) -> GraphSnapshot {
        let analytics = self.analytics();
        let nodes = self
            .nodes()
            .map(|node| {
                let score = |map: Option<&std::collections::HashMap<String, f64>>| {
                    map.and_then(|m| m.get(&node.id).copied())
                };
                let in_degree = self.in_degree(&node.id);
                let out_degree = self.out_degree(&node.id);
                AnnotatedNode {
                    node: node.clone(),
                    in_degree,
                    out_degree,
                    degree: in_degree + out_degree,
                    pagerank: score(analytics.map(|a| &a.pagerank)),
                    betweenness: score(analytics.map(|a| &a.betweenness)),
                    closeness: score(analytics.map(|a| &a.closeness)),
                }
            })
            .collect();

        GraphSnapshot {
            generation: self.generation(),
            nodes,
            edges: self.edges().cloned().collect(),
        }
    }

    pub fn stats(&self) -> GraphStats {
        let n = self.node_count();
        let e = self.edge_count();
        let density = if n > 1 {
            e as f64 / (n * (n - 1)) as f64
        } else {
            0.0
        };
        GraphStats {
            node_count: n,
            edge_count: e,
            density,
        }
    }
}
