use serde::{Deserialize, Serialize};

use super::edge::Provenance;
use super::relation::RelationKind;

/// A causal assertion delivered by the upstream extraction pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalTriple {
    pub source: String,
    pub relation: RelationKind,
    pub target: String,
    /// Extraction confidence in [0, 1].
    pub confidence: f64,
    #[serde(default)]
    pub source_domain: Option<String>,
    #[serde(default)]
    pub target_domain: Option<String>,
    #[serde(default)]
    pub provenance: Option<Provenance>,
}

impl CausalTriple {
    pub fn new(
        source: impl Into<String>,
        relation: RelationKind,
        target: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            source: source.into(),
            relation,
            target: target.into(),
            confidence,
            source_domain: None,
            target_domain: None,
            provenance: None,
        }
    }

    /// Tag both concepts with domains.
    pub fn with_domains(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.source_domain = Some(source.into());
        self.target_domain = Some(target.into());
        self
    }
}
