use serde::{Deserialize, Serialize};

use super::defaults;

/// Slice partitioning and functor matching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceConfig {
    /// A node is a hub when its total slice degree exceeds this.
    pub hub_degree_threshold: usize,
    /// A source node is matched only when its best similarity exceeds this.
    pub min_match_similarity: f64,
    pub degree_weight: f64,
    pub role_weight: f64,
    pub relation_weight: f64,
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            hub_degree_threshold: defaults::DEFAULT_HUB_DEGREE_THRESHOLD,
            min_match_similarity: defaults::DEFAULT_MIN_MATCH_SIMILARITY,
            degree_weight: defaults::DEFAULT_DEGREE_WEIGHT,
            role_weight: defaults::DEFAULT_ROLE_WEIGHT,
            relation_weight: defaults::DEFAULT_RELATION_WEIGHT,
        }
    }
}
