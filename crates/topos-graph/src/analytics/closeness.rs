//! Closeness centrality over reachable nodes only.

use std::collections::VecDeque;

use super::topology::Topology;

/// `(reachable / (n - 1)) * (reachable / sum_of_distances)` per source.
///
/// Unreachable nodes do not contribute; a node that reaches nothing scores 0.
pub(crate) fn closeness(topology: &Topology) -> Vec<f64> {
    let n = topology.len();
    let mut scores = vec![0.0; n];
    if n < 2 {
        return scores;
    }

    let mut dist = vec![usize::MAX; n];
    let mut queue = VecDeque::new();
    for s in 0..n {
        dist.iter_mut().for_each(|d| *d = usize::MAX);
        dist[s] = 0;
        queue.push_back(s);

        let mut reachable = 0usize;
        let mut total = 0usize;
        while let Some(v) = queue.pop_front() {
            for &w in &topology.out[v] {
                if dist[w] == usize::MAX {
                    dist[w] = dist[v] + 1;
                    reachable += 1;
                    total += dist[w];
                    queue.push_back(w);
                }
            }
        }

        if reachable > 0 && total > 0 {
            let r = reachable as f64;
            scores[s] = (r / (n - 1) as f64) * (r / total as f64);
        }
    }
    scores
}
