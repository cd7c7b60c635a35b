//! Path queries: unweighted shortest path and bounded simple-path enumeration.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;
use topos_core::constants::MAX_CAUSAL_PATH_DEPTH;
use tracing::warn;

use crate::graph::CausalGraph;

/// A directed path as a sequence of node ids.
pub type CausalPath = Vec<String>;

impl CausalGraph {
    /// Shortest directed path by hop count.
    ///
    /// `None` means no path (including unknown endpoints). A node's path to
    /// itself is the single-element path.
    pub fn find_shortest_path(&self, from: &str, to: &str) -> Option<CausalPath> {
        let start = self.index_of(from)?;
        let goal = self.index_of(to)?;
        if start == goal {
            return Some(vec![from.to_string()]);
        }

        let mut prev: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
        let mut queue: VecDeque<NodeIndex> = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for next in self.neighbors_of_index(current, &[Direction::Outgoing]) {
                if !visited.insert(next) {
                    continue;
                }
                prev.insert(next, current);
                if next == goal {
                    return Some(self.reconstruct(&prev, goal));
                }
                queue.push_back(next);
            }
        }
        None
    }

    /// Every simple directed path from `from` to `to` of at most `max_depth`
    /// hops. A `max_depth` above [`MAX_CAUSAL_PATH_DEPTH`] is lowered to it
    /// with a warning.
    ///
    /// The active path doubles as the visited set, so cycles never recurse.
    pub fn find_causal_paths(&self, from: &str, to: &str, max_depth: usize) -> Vec<CausalPath> {
        let (Some(start), Some(goal)) = (self.index_of(from), self.index_of(to)) else {
            return Vec::new();
        };
        if max_depth > MAX_CAUSAL_PATH_DEPTH {
            warn!(
                requested = max_depth,
                cap = MAX_CAUSAL_PATH_DEPTH,
                "causal path depth capped"
            );
        }
        let max_depth = max_depth.min(MAX_CAUSAL_PATH_DEPTH);

        let mut paths = Vec::new();
        let mut on_path: HashSet<NodeIndex> = HashSet::from([start]);
        let mut path = vec![start];
        self.extend_paths(goal, max_depth, &mut path, &mut on_path, &mut paths);
        paths
    }

    fn extend_paths(
        &self,
        goal: NodeIndex,
        max_depth: usize,
        path: &mut Vec<NodeIndex>,
        on_path: &mut HashSet<NodeIndex>,
        paths: &mut Vec<CausalPath>,
    ) {
        let Some(&current) = path.last() else {
            return;
        };
        if current == goal {
            paths.push(path.iter().map(|&idx| self.id_of(idx).to_string()).collect());
            return;
        }
        if path.len() > max_depth {
            return;
        }
        for next in self.neighbors_of_index(current, &[Direction::Outgoing]) {
            if !on_path.insert(next) {
                continue;
            }
            path.push(next);
            self.extend_paths(goal, max_depth, path, on_path, paths);
            path.pop();
            on_path.remove(&next);
        }
    }

    fn reconstruct(&self, prev: &HashMap<NodeIndex, NodeIndex>, goal: NodeIndex) -> CausalPath {
        let mut path = vec![self.id_of(goal).to_string()];
        let mut current = goal;
        while let Some(&p) = prev.get(&current) {
            path.push(self.id_of(p).to_string());
            current = p;
        }
        path.reverse();
        path
    }
}
