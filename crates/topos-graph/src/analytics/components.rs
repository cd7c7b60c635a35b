//! Weakly connected components and strongly connected components.

use std::collections::VecDeque;

use petgraph::algo::tarjan_scc;

use super::topology::Topology;
use crate::graph::CausalGraph;

/// Components treating every edge as undirected. Members in BFS order,
/// components ordered by their earliest-inserted member.
pub(crate) fn connected_components(topology: &Topology) -> Vec<Vec<String>> {
    let n = topology.len();
    let mut seen = vec![false; n];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..n {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        queue.push_back(start);
        let mut members = Vec::new();
        while let Some(v) = queue.pop_front() {
            members.push(topology.ids[v].clone());
            for &w in &topology.undirected[v] {
                if !seen[w] {
                    seen[w] = true;
                    queue.push_back(w);
                }
            }
        }
        components.push(members);
    }
    components
}

/// Strongly connected components via Tarjan's algorithm (index/lowlink with
/// an explicit stack). Emitted in reverse topological order of the
/// condensation; members sorted by insertion order.
pub(crate) fn strongly_connected_components(graph: &CausalGraph) -> Vec<Vec<String>> {
    tarjan_scc(&graph.graph)
        .into_iter()
        .map(|mut scc| {
            scc.sort_by_key(|&idx| graph.entry(idx).seq);
            scc.into_iter()
                .map(|idx| graph.id_of(idx).to_string())
                .collect()
        })
        .collect()
}
