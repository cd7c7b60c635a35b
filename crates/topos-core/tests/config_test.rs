use topos_core::config::*;
use topos_core::errors::ConfigError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = ToposConfig::from_toml("").unwrap();

    // Graph defaults
    assert_eq!(config.graph.pagerank_damping, 0.85);
    assert_eq!(config.graph.pagerank_iterations, 20);
    assert_eq!(config.graph.max_path_depth, 5);

    // Complex defaults
    assert_eq!(
        config.complex.positional_encoding,
        PositionalEncoding::InsertionOrder
    );
    assert_eq!(config.complex.positional_scale, 0.1);

    // Refiner defaults
    assert_eq!(config.refiner.embedding_dim, 128);
    assert_eq!(config.refiner.num_heads, 4);
    assert_eq!(config.refiner.num_layers, 2);
    assert!(config.refiner.use_layer_norm);

    // Slice defaults
    assert_eq!(config.slices.hub_degree_threshold, 3);
    assert_eq!(config.slices.min_match_similarity, 0.3);
    assert_eq!(config.slices.relation_weight, 0.4);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(config.observability.json);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[refiner]
embedding_dim = 16
num_heads = 2

[complex]
positional_encoding = "disabled"
"#;
    let config = ToposConfig::from_toml(toml).unwrap();
    assert_eq!(config.refiner.embedding_dim, 16);
    assert_eq!(config.refiner.num_heads, 2);
    // Non-overridden fields keep defaults
    assert_eq!(config.refiner.hidden_dim, 256);
    assert_eq!(config.complex.positional_encoding, PositionalEncoding::Disabled);
    assert_eq!(config.graph.pagerank_iterations, 20);
}

#[test]
fn heads_must_divide_embedding_dim() {
    let toml = r#"
[refiner]
embedding_dim = 10
num_heads = 3
"#;
    let err = ToposConfig::from_toml(toml).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "refiner.num_heads"));
}

#[test]
fn slice_weights_must_sum_to_one() {
    let toml = r#"
[slices]
degree_weight = 0.5
"#;
    assert!(ToposConfig::from_toml(toml).is_err());
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = ToposConfig::from_toml("[graph\npagerank_damping = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn missing_file_is_reported() {
    let err = ToposConfig::from_file(std::path::Path::new("/nonexistent/topos.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn config_serde_roundtrip() {
    let config = ToposConfig::default();
    let toml_str = config.to_toml().unwrap();
    let roundtripped = ToposConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.refiner.seed, config.refiner.seed);
    assert_eq!(
        roundtripped.slices.hub_degree_threshold,
        config.slices.hub_degree_threshold
    );
}
