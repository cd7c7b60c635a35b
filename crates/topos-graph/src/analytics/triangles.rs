//! Triangle enumeration: node triples pairwise connected in either direction.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::topology::Topology;

/// A 2-simplex with its vertices in canonical (ascending id) order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [String; 3],
}

impl Triangle {
    /// Build a triangle from any three ids; they are sorted into canonical order.
    pub fn new(a: impl Into<String>, b: impl Into<String>, c: impl Into<String>) -> Self {
        let mut vertices = [a.into(), b.into(), c.into()];
        vertices.sort();
        Self { vertices }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.vertices.iter().any(|v| v == id)
    }

    /// The three unordered vertex pairs.
    pub fn pairs(&self) -> [(&str, &str); 3] {
        let [a, b, c] = &self.vertices;
        [
            (a.as_str(), b.as_str()),
            (a.as_str(), c.as_str()),
            (b.as_str(), c.as_str()),
        ]
    }
}

/// For every node a, every neighbor b > a, every neighbor c > b of b, emit
/// (a, b, c) when a and c are adjacent. Ordering is by node id, so each
/// triangle is produced exactly once. Output is sorted.
pub(crate) fn triangles(topology: &Topology) -> Vec<Triangle> {
    let ids = &topology.ids;
    let adjacency: Vec<HashSet<usize>> = topology
        .undirected
        .iter()
        .map(|list| list.iter().copied().collect())
        .collect();

    let mut found = Vec::new();
    for a in 0..topology.len() {
        for &b in &topology.undirected[a] {
            if ids[b] <= ids[a] {
                continue;
            }
            for &c in &topology.undirected[b] {
                if ids[c] <= ids[b] {
                    continue;
                }
                if adjacency[a].contains(&c) {
                    found.push(Triangle {
                        vertices: [ids[a].clone(), ids[b].clone(), ids[c].clone()],
                    });
                }
            }
        }
    }
    found.sort();
    found
}
