use serde::{Deserialize, Serialize};

use super::defaults;

/// Graph analytics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// PageRank damping factor.
    pub pagerank_damping: f64,
    /// Number of synchronous PageRank power iterations.
    pub pagerank_iterations: usize,
    /// Default hop bound for causal path enumeration.
    pub max_path_depth: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            pagerank_damping: defaults::DEFAULT_PAGERANK_DAMPING,
            pagerank_iterations: defaults::DEFAULT_PAGERANK_ITERATIONS,
            max_path_depth: defaults::DEFAULT_MAX_PATH_DEPTH,
        }
    }
}
