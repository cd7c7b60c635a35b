use criterion::{criterion_group, criterion_main, Criterion};

use topos_core::config::GraphConfig;
use topos_core::models::{Edge, Node, RelationKind};
use topos_graph::CausalGraph;

/// 200 nodes, each linked to its next 5 neighbors plus a back edge every
/// tenth node so the graph carries cycles.
fn build_graph() -> CausalGraph {
    let n = 200;
    let mut graph = CausalGraph::new();
    for i in 0..n {
        graph.add_node(Node::new(format!("n{i}"), format!("Node {i}"))).unwrap();
    }
    let mut k = 0;
    for i in 0..n {
        for j in 1..=5 {
            if i + j < n {
                let kind = RelationKind::ALL[(i + j) % RelationKind::COUNT];
                graph
                    .add_edge(Edge::new(format!("e{k}"), format!("n{i}"), format!("n{}", i + j), kind))
                    .unwrap();
                k += 1;
            }
        }
        if i % 10 == 9 {
            graph
                .add_edge(Edge::new(format!("e{k}"), format!("n{i}"), format!("n{}", i - 9), RelationKind::Inhibits))
                .unwrap();
            k += 1;
        }
    }
    graph
}

fn bench_analytics(c: &mut Criterion) {
    let graph = build_graph();
    let config = GraphConfig::default();

    c.bench_function("pagerank_1k_edges", |b| b.iter(|| graph.pagerank(&config)));
    c.bench_function("betweenness_1k_edges", |b| b.iter(|| graph.betweenness_centrality()));
    c.bench_function("triangles_1k_edges", |b| b.iter(|| graph.find_triangles()));
}

fn bench_paths(c: &mut Criterion) {
    let graph = build_graph();

    c.bench_function("causal_paths_depth_4", |b| {
        b.iter(|| graph.find_causal_paths("n0", "n20", 4))
    });
    c.bench_function("ancestors_1k_edges", |b| b.iter(|| graph.find_all_ancestors("n150")));
}

criterion_group!(benches, bench_analytics, bench_paths);
criterion_main!(benches);
