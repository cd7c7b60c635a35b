use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::relation::RelationKind;

/// Where a causal assertion came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Provenance {
    /// Identifier of the originating statement.
    pub statement_id: Option<String>,
    /// Original statement text.
    pub text: Option<String>,
    pub extracted_at: Option<DateTime<Utc>>,
}

/// A typed, directed causal relation between two nodes.
///
/// `source` and `target` are fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub relation: RelationKind,
    /// Weight/confidence in [0, 1].
    pub confidence: Option<f64>,
    pub provenance: Option<Provenance>,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        relation: RelationKind,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            relation,
            confidence: None,
            provenance: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Whether the confidence, if present, lies in [0, 1].
    pub fn has_valid_confidence(&self) -> bool {
        self.confidence.map_or(true, |c| (0.0..=1.0).contains(&c))
    }

    /// Whether this edge touches `node_id` at either end.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
