// Single source of truth for all default values.

// --- Graph analytics ---
pub const DEFAULT_PAGERANK_DAMPING: f64 = 0.85;
pub const DEFAULT_PAGERANK_ITERATIONS: usize = 20;
pub const DEFAULT_MAX_PATH_DEPTH: usize = 5;

// --- Simplicial complex ---
pub const DEFAULT_POSITIONAL_SCALE: f32 = 0.1;

// --- Embedding refiner ---
pub const DEFAULT_EMBEDDING_DIM: usize = 128;
pub const DEFAULT_HIDDEN_DIM: usize = 256;
pub const DEFAULT_NUM_HEADS: usize = 4;
pub const DEFAULT_NUM_LAYERS: usize = 2;
pub const DEFAULT_DROPOUT: f32 = 0.1;
pub const DEFAULT_USE_LAYER_NORM: bool = true;
pub const DEFAULT_REFINER_SEED: u64 = 42;

// --- Slices / functors ---
pub const DEFAULT_HUB_DEGREE_THRESHOLD: usize = 3;
pub const DEFAULT_MIN_MATCH_SIMILARITY: f64 = 0.3;
pub const DEFAULT_DEGREE_WEIGHT: f64 = 0.3;
pub const DEFAULT_ROLE_WEIGHT: f64 = 0.3;
pub const DEFAULT_RELATION_WEIGHT: f64 = 0.4;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = true;
