use serde::{Deserialize, Serialize};

/// One matched concept pair inside an analogy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptPair {
    pub source_id: String,
    pub source_label: String,
    pub target_id: String,
    pub target_label: String,
    pub similarity: f64,
}

/// A retained domain pair with its functor similarity and matched concepts,
/// most similar pair first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogyReport {
    pub source_domain: String,
    pub target_domain: String,
    pub similarity: f64,
    pub pairs: Vec<ConceptPair>,
}
