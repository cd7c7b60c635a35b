/// Topos system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Node type assigned to concepts created from causal triples.
pub const CONCEPT_NODE_TYPE: &str = "concept";

/// Number of ordered node pairs inside a triangle (3 pairs, both directions).
pub const TRIANGLE_DIRECTED_PAIRS: usize = 6;

/// Upper bound on `max_depth` accepted by bounded path enumeration.
pub const MAX_CAUSAL_PATH_DEPTH: usize = 32;
