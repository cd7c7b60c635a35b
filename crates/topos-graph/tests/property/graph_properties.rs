//! Property tests for topos-graph: PageRank mass, cascade removal, atomic
//! edge rejection, and degenerate centrality.

use proptest::prelude::*;

use topos_core::config::GraphConfig;
use topos_core::models::{Edge, Node, RelationKind};
use topos_graph::CausalGraph;

fn build(n: usize, edges: &[(usize, usize, usize)]) -> CausalGraph {
    let mut graph = CausalGraph::new();
    for i in 0..n {
        graph.add_node(Node::new(format!("n{i}"), format!("Node {i}"))).unwrap();
    }
    for (k, &(src, tgt, kind)) in edges.iter().enumerate() {
        if src < n && tgt < n {
            let relation = RelationKind::ALL[kind % RelationKind::COUNT];
            graph
                .add_edge(Edge::new(format!("e{k}"), format!("n{src}"), format!("n{tgt}"), relation))
                .unwrap();
        }
    }
    graph
}

fn edge_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize, usize)>> {
    prop::collection::vec((0..n, 0..n, 0..RelationKind::COUNT), 0..n * 3)
}

// =============================================================================
// PageRank mass is conserved when no node is a sink
// =============================================================================
proptest! {
    #[test]
    fn pagerank_sums_to_one_without_sinks(
        n in 2_usize..12,
        extra in prop::collection::vec((0_usize..12, 0_usize..12), 0..24),
        damping in 0.5_f64..0.95,
    ) {
        // A ring guarantees out-degree > 0 everywhere.
        let mut edges: Vec<(usize, usize, usize)> = (0..n).map(|i| (i, (i + 1) % n, 0)).collect();
        edges.extend(extra.into_iter().filter(|&(s, t)| s < n && t < n).map(|(s, t)| (s, t, 1)));
        let graph = build(n, &edges);
        let config = GraphConfig { pagerank_damping: damping, ..GraphConfig::default() };
        let total: f64 = graph.pagerank(&config).values().sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "total = {}", total);
    }
}

// =============================================================================
// remove_node leaves no dangling references
// =============================================================================
proptest! {
    #[test]
    fn remove_node_leaves_no_dangling_edges(
        edges in edge_strategy(10),
        victim in 0_usize..10,
    ) {
        let mut graph = build(10, &edges);
        let id = format!("n{victim}");
        graph.remove_node(&id);
        prop_assert!(!graph.contains_node(&id));
        prop_assert!(graph.edges().all(|e| !e.touches(&id)));
        for node in graph.nodes() {
            prop_assert!(!graph.all_neighbors(&node.id).contains(&id.as_str()));
        }
        prop_assert_eq!(graph.edges().count(), graph.edge_count());
    }
}

// =============================================================================
// A rejected add_edge changes nothing
// =============================================================================
proptest! {
    #[test]
    fn rejected_edge_is_atomic(
        edges in edge_strategy(8),
        src in 0_usize..8,
        ghost_as_source in any::<bool>(),
    ) {
        let mut graph = build(8, &edges);
        let generation = graph.generation();
        let edge_count = graph.edge_count();
        let out_before = graph.out_degree(&format!("n{src}"));
        let in_before = graph.in_degree(&format!("n{src}"));

        let (s, t) = if ghost_as_source {
            ("ghost".to_string(), format!("n{src}"))
        } else {
            (format!("n{src}"), "ghost".to_string())
        };
        prop_assert!(graph.add_edge(Edge::new("new", s, t, RelationKind::Causes)).is_err());
        prop_assert_eq!(graph.generation(), generation);
        prop_assert_eq!(graph.edge_count(), edge_count);
        prop_assert_eq!(graph.out_degree(&format!("n{src}")), out_before);
        prop_assert_eq!(graph.in_degree(&format!("n{src}")), in_before);
        prop_assert!(!graph.contains_edge("new"));
    }
}

// =============================================================================
// Isolated nodes: zero betweenness, zero closeness, trivial shortest path
// =============================================================================
proptest! {
    #[test]
    fn isolated_node_scores_zero(edges in edge_strategy(8)) {
        let mut graph = build(8, &edges);
        graph.add_node(Node::new("iso", "Isolated")).unwrap();
        prop_assert_eq!(graph.betweenness_centrality()["iso"], 0.0);
        prop_assert_eq!(graph.closeness_centrality()["iso"], 0.0);
        prop_assert_eq!(graph.find_shortest_path("iso", "iso"), Some(vec!["iso".to_string()]));
        prop_assert_eq!(graph.find_shortest_path("n0", "iso"), None);
    }
}

// =============================================================================
// Triangles are canonical and unique
// =============================================================================
proptest! {
    #[test]
    fn triangles_are_canonical_and_unique(edges in edge_strategy(9)) {
        let graph = build(9, &edges);
        let triangles = graph.find_triangles();
        for t in &triangles {
            prop_assert!(t.vertices[0] < t.vertices[1] && t.vertices[1] < t.vertices[2]);
            for (a, b) in t.pairs() {
                prop_assert!(!graph.edges_between(a, b).is_empty() || !graph.edges_between(b, a).is_empty());
            }
        }
        let mut deduped = triangles.clone();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), triangles.len());
    }
}
