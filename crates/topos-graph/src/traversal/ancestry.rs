//! Transitive causal queries: ancestors, descendants, roots, and terminal effects.

use std::collections::{HashSet, VecDeque};

use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;
use topos_core::models::Node;

use crate::graph::CausalGraph;

impl CausalGraph {
    /// Every node that can reach `id`, in BFS order. Excludes `id` itself.
    pub fn find_all_ancestors(&self, id: &str) -> Vec<&Node> {
        self.nodes_of(self.reach(id, Direction::Incoming))
    }

    /// Every node reachable from `id`, in BFS order. Excludes `id` itself.
    pub fn find_all_descendants(&self, id: &str) -> Vec<&Node> {
        self.nodes_of(self.reach(id, Direction::Outgoing))
    }

    /// Ancestors of `id` with no incoming edges.
    pub fn find_root_causes(&self, id: &str) -> Vec<&Node> {
        let roots = self
            .reach(id, Direction::Incoming)
            .into_iter()
            .filter(|&idx| self.neighbors_of_index(idx, &[Direction::Incoming]).is_empty())
            .collect();
        self.nodes_of(roots)
    }

    /// Descendants of `id` with no outgoing edges.
    pub fn find_ultimate_effects(&self, id: &str) -> Vec<&Node> {
        let leaves = self
            .reach(id, Direction::Outgoing)
            .into_iter()
            .filter(|&idx| self.neighbors_of_index(idx, &[Direction::Outgoing]).is_empty())
            .collect();
        self.nodes_of(leaves)
    }

    /// Unbounded BFS with a visited set, so cycles terminate.
    fn reach(&self, id: &str, direction: Direction) -> Vec<NodeIndex> {
        let Some(start) = self.index_of(id) else {
            return Vec::new();
        };

        let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
        let mut queue: VecDeque<NodeIndex> = VecDeque::from([start]);
        let mut found = Vec::new();

        while let Some(current) = queue.pop_front() {
            for next in self.neighbors_of_index(current, &[direction]) {
                if visited.insert(next) {
                    found.push(next);
                    queue.push_back(next);
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use topos_core::models::{Edge, Node, RelationKind};

    use crate::graph::CausalGraph;

    fn ids(nodes: Vec<&Node>) -> Vec<&str> {
        nodes.into_iter().map(|n| n.id.as_str()).collect()
    }

    /// r1 → a → b → c, r2 → b, with a feedback loop c → a.
    fn looped() -> CausalGraph {
        let mut graph = CausalGraph::new();
        for id in ["r1", "r2", "a", "b", "c", "leaf"] {
            graph.add_node(Node::new(id, id)).unwrap();
        }
        for (s, t) in [("r1", "a"), ("a", "b"), ("r2", "b"), ("b", "c"), ("c", "a"), ("b", "leaf")] {
            graph
                .add_edge(Edge::new(format!("{s}{t}"), s, t, RelationKind::Causes))
                .unwrap();
        }
        graph
    }

    #[test]
    fn ancestors_terminate_on_cycles() {
        let graph = looped();
        let mut ancestors = ids(graph.find_all_ancestors("b"));
        ancestors.sort();
        assert_eq!(ancestors, vec!["a", "c", "r1", "r2"]);
    }

    #[test]
    fn roots_and_ultimate_effects() {
        let graph = looped();
        assert_eq!(ids(graph.find_root_causes("c")), vec!["r2", "r1"]);
        assert_eq!(ids(graph.find_ultimate_effects("r1")), vec!["leaf"]);
        assert!(graph.find_root_causes("r1").is_empty());
    }

    #[test]
    fn unknown_node_has_no_ancestry() {
        let graph = looped();
        assert!(graph.find_all_descendants("nope").is_empty());
    }
}
