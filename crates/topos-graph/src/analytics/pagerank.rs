//! PageRank by synchronous power iteration.

use super::topology::Topology;

/// Run `iterations` rounds of PageRank starting from uniform mass 1/n.
///
/// Each round gives every node `(1 - damping) / n` plus, from every
/// in-neighbor `u`, `damping * rank[u] / out_degree(u)`. Nodes with no
/// out-neighbors do not redistribute their mass, so it leaks out of the
/// system and scores sum to less than 1 when sinks exist. This is an
/// accepted approximation: the scores are used for ranking only.
pub(crate) fn pagerank(topology: &Topology, damping: f64, iterations: usize) -> Vec<f64> {
    let n = topology.len();
    if n == 0 {
        return Vec::new();
    }
    let base = (1.0 - damping) / n as f64;
    let mut rank = vec![1.0 / n as f64; n];

    for _ in 0..iterations {
        let mut next = vec![base; n];
        for (u, targets) in topology.out.iter().enumerate() {
            if targets.is_empty() {
                continue;
            }
            let share = damping * rank[u] / targets.len() as f64;
            for &v in targets {
                next[v] += share;
            }
        }
        rank = next;
    }
    rank
}
