//! Integration tests for topos-refiner.

use std::collections::HashMap;

use topos_complex::{ComplexBuilder, SimplicialComplex};
use topos_core::config::RefinerConfig;
use topos_core::errors::{EmbeddingError, ToposError};
use topos_core::models::{Edge, Node, RelationKind};
use topos_graph::CausalGraph;
use topos_refiner::{EmbeddingRefiner, ProgressReporter, RefinePhase};

const DIM: usize = 8;

fn config() -> RefinerConfig {
    RefinerConfig {
        embedding_dim: DIM,
        hidden_dim: 16,
        num_heads: 2,
        num_layers: 2,
        ..RefinerConfig::default()
    }
}

fn graph(ids: &[&str], edges: &[(&str, &str)]) -> CausalGraph {
    let mut graph = CausalGraph::new();
    for id in ids {
        graph.add_node(Node::new(*id, *id)).unwrap();
    }
    for (s, t) in edges {
        graph
            .add_edge(Edge::new(format!("{s}{t}"), *s, *t, RelationKind::Causes))
            .unwrap();
    }
    graph
}

fn complex_of(graph: &CausalGraph) -> SimplicialComplex {
    ComplexBuilder::default().build(graph)
}

fn embeddings(ids: &[&str]) -> HashMap<String, Vec<f32>> {
    ids.iter()
        .map(|id| (id.to_string(), test_fixtures::embedding_for(id, DIM)))
        .collect()
}

#[test]
fn zero_structure_is_projection_of_original() {
    let graph = graph(&["a", "b", "c"], &[]);
    let refiner = EmbeddingRefiner::new(config()).unwrap();
    let input = embeddings(&["a", "b", "c"]);

    let refined = refiner.refine(&complex_of(&graph), &input).unwrap();
    let zeros = vec![0.0; DIM];
    for (id, original) in &input {
        let expected = refiner.project_node(original, &zeros, &zeros).unwrap();
        assert_eq!(refined[id], expected);
    }
}

#[test]
fn output_keys_match_input_keys() {
    let graph = graph(&["a", "b", "c", "d"], &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")]);
    let refiner = EmbeddingRefiner::new(config()).unwrap();
    // d has no embedding; "outside" is not in the graph.
    let input = embeddings(&["a", "b", "c", "outside"]);

    let (refined, outcome) = refiner
        .refine_with_outcome(&complex_of(&graph), &input)
        .unwrap();
    let mut keys: Vec<&String> = refined.keys().collect();
    keys.sort();
    assert_eq!(keys, vec!["a", "b", "c", "outside"]);
    assert!(refined.values().all(|v| v.len() == DIM));
    assert_eq!(outcome.edges_used, 3);
    assert_eq!(outcome.edges_skipped, 1);
    assert_eq!(outcome.triangles_used, 1);
    assert_eq!(refiner.scratch_outstanding(), 0);
}

#[test]
fn same_seed_same_output() {
    let graph = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("a", "c")]);
    let complex = complex_of(&graph);
    let input = embeddings(&["a", "b", "c"]);

    let first = EmbeddingRefiner::new(config()).unwrap().refine(&complex, &input).unwrap();
    let second = EmbeddingRefiner::new(config()).unwrap().refine(&complex, &input).unwrap();
    assert_eq!(first, second);

    let reseeded = EmbeddingRefiner::new(RefinerConfig { seed: 7, ..config() })
        .unwrap()
        .refine(&complex, &input)
        .unwrap();
    assert_ne!(first, reseeded);
}

#[test]
fn structure_changes_the_result() {
    let input = embeddings(&["a", "b"]);
    let refiner = EmbeddingRefiner::new(config()).unwrap();
    let bare = refiner.refine(&complex_of(&graph(&["a", "b"], &[])), &input).unwrap();
    let linked = refiner
        .refine(&complex_of(&graph(&["a", "b"], &[("a", "b")])), &input)
        .unwrap();
    assert_ne!(bare["a"], linked["a"]);
    // b is only a target, so it receives no edge contribution.
    assert_eq!(bare["b"], linked["b"]);
}

#[test]
fn dimension_mismatch_fails_before_compute() {
    let graph = graph(&["a", "b"], &[("a", "b")]);
    let refiner = EmbeddingRefiner::new(config()).unwrap();
    let mut input = embeddings(&["a"]);
    input.insert("b".to_string(), vec![0.5; DIM + 1]);

    let err = refiner.refine(&complex_of(&graph), &input).unwrap_err();
    assert!(matches!(
        err,
        ToposError::Embedding(EmbeddingError::DimensionMismatch { ref node_id, expected: DIM, actual })
            if node_id == "b" && actual == DIM + 1
    ));
    assert_eq!(refiner.scratch_outstanding(), 0);
}

#[test]
fn invalid_config_is_rejected() {
    let err = EmbeddingRefiner::new(RefinerConfig { num_heads: 3, ..config() }).unwrap_err();
    assert!(matches!(err, ToposError::Embedding(EmbeddingError::InvalidConfig { .. })));
}

#[test]
fn disposed_refiner_refuses_work() {
    let mut refiner = EmbeddingRefiner::new(config()).unwrap();
    refiner.dispose();
    assert!(refiner.is_disposed());
    let graph = graph(&["a"], &[]);
    let err = refiner.refine(&complex_of(&graph), &embeddings(&["a"])).unwrap_err();
    assert!(matches!(err, ToposError::Embedding(EmbeddingError::Disposed)));
    // Disposing twice is harmless.
    refiner.dispose();
}

#[test]
fn layer_norm_toggle_changes_output() {
    let graph = graph(&["a", "b"], &[("a", "b")]);
    let complex = complex_of(&graph);
    let input = embeddings(&["a", "b"]);
    let with_norm = EmbeddingRefiner::new(config()).unwrap().refine(&complex, &input).unwrap();
    let without = EmbeddingRefiner::new(RefinerConfig { use_layer_norm: false, ..config() })
        .unwrap()
        .refine(&complex, &input)
        .unwrap();
    assert_ne!(with_norm["a"], without["a"]);
}

#[tokio::test]
async fn progress_reaches_complete_and_matches_sync_result() {
    let graph = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
    let complex = complex_of(&graph);
    let input = embeddings(&["a", "b", "c"]);
    let refiner = EmbeddingRefiner::new(config()).unwrap();

    let reporter = ProgressReporter::new();
    let mut rx = reporter.subscribe();
    let (refined, outcome) = refiner
        .refine_with_progress(&complex, &input, &reporter)
        .await
        .unwrap();

    assert!(rx.has_changed().unwrap());
    let last = *rx.borrow_and_update();
    assert_eq!(last.phase, RefinePhase::Complete);
    assert_eq!(last.percent, 100);
    assert_eq!(outcome.triangles_used, 1);
    assert_eq!(refined, refiner.refine(&complex, &input).unwrap());
}

#[tokio::test]
async fn progress_stops_at_validation_on_error() {
    let graph = graph(&["a"], &[]);
    let refiner = EmbeddingRefiner::new(config()).unwrap();
    let reporter = ProgressReporter::new();
    let mut input = HashMap::new();
    input.insert("a".to_string(), vec![1.0; 3]);

    assert!(refiner
        .refine_with_progress(&complex_of(&graph), &input, &reporter)
        .await
        .is_err());
    assert_eq!(reporter.current().phase, RefinePhase::Validating);
}
