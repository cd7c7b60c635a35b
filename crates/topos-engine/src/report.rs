//! Combined export for the visualization layer.

use serde::{Deserialize, Serialize};
use topos_complex::ComplexSummary;
use topos_core::errors::ToposResult;
use topos_graph::GraphStats;
use topos_slices::AnalogyReport;

/// Graph and complex statistics, feedback loops, and ranked analogies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineReport {
    pub stats: GraphStats,
    pub complex: ComplexSummary,
    pub feedback_loops: Vec<Vec<String>>,
    pub analogies: Vec<AnalogyReport>,
}

impl EngineReport {
    pub fn to_json(&self) -> ToposResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
