use serde::{Deserialize, Serialize};

use super::defaults;

/// Which ordering keys the sinusoidal positional term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionalEncoding {
    /// No positional term is added.
    Disabled,
    /// Keyed by the order in which nodes were inserted into the graph.
    InsertionOrder,
}

/// Simplicial complex configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexConfig {
    pub positional_encoding: PositionalEncoding,
    /// Multiplier applied to the sinusoidal term before it is added.
    pub positional_scale: f32,
}

impl Default for ComplexConfig {
    fn default() -> Self {
        Self {
            positional_encoding: PositionalEncoding::InsertionOrder,
            positional_scale: defaults::DEFAULT_POSITIONAL_SCALE,
        }
    }
}
