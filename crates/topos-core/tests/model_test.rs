use proptest::prelude::*;
use topos_core::models::{CausalTriple, Edge, Node, RelationKind};

#[test]
fn triple_deserializes_with_optional_domains() {
    let json = r#"{"source":"Inflation","relation":"increases","target":"Interest Rates","confidence":0.8}"#;
    let triple: CausalTriple = serde_json::from_str(json).unwrap();
    assert_eq!(triple.relation, RelationKind::Increases);
    assert!(triple.source_domain.is_none());
    assert!(triple.provenance.is_none());
}

#[test]
fn node_builder_sets_fields() {
    let node = Node::new("a", "A").with_domain("econ").with_embedding(vec![0.0; 4]);
    assert_eq!(node.domain.as_deref(), Some("econ"));
    assert_eq!(node.embedding.as_ref().map(Vec::len), Some(4));
    assert_eq!(node.node_type, "concept");
}

#[test]
fn edge_touches_both_endpoints() {
    let edge = Edge::new("e1", "a", "b", RelationKind::Causes);
    assert!(edge.touches("a"));
    assert!(edge.touches("b"));
    assert!(!edge.touches("c"));
}

proptest! {
    #[test]
    fn confidence_validity_matches_unit_interval(value in -2.0_f64..2.0) {
        let edge = Edge::new("e", "a", "b", RelationKind::Causes).with_confidence(value);
        prop_assert_eq!(edge.has_valid_confidence(), (0.0..=1.0).contains(&value));
    }
}
