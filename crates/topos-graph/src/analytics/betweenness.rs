//! Brandes betweenness centrality for directed, unweighted graphs.

use std::collections::VecDeque;

use super::topology::Topology;

/// Betweenness of every node, normalized by 1/((n-1)(n-2)) when n > 2.
pub(crate) fn betweenness(topology: &Topology) -> Vec<f64> {
    let n = topology.len();
    let mut centrality = vec![0.0; n];

    let mut sigma = vec![0.0_f64; n];
    let mut dist = vec![-1_i64; n];
    let mut delta = vec![0.0_f64; n];
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut queue: VecDeque<usize> = VecDeque::new();

    for s in 0..n {
        for v in 0..n {
            sigma[v] = 0.0;
            dist[v] = -1;
            delta[v] = 0.0;
            preds[v].clear();
        }
        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        // Forward BFS: shortest-path counts and predecessor sets.
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in &topology.out[v] {
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        // Back-propagate dependencies in order of non-increasing distance.
        while let Some(w) = stack.pop() {
            for &v in &preds[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != s {
                centrality[w] += delta[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for c in &mut centrality {
            *c *= scale;
        }
    }
    centrality
}
