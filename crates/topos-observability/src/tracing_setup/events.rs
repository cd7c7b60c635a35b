//! Structured log events for key operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a completed ingestion batch.
pub fn triples_ingested(triples: usize, nodes_created: usize, edges_created: usize) {
    tracing::info!(
        event = "triples_ingested",
        triples,
        nodes_created,
        edges_created,
        "triples ingested"
    );
}

/// Log a rejected triple.
pub fn triple_rejected(source: &str, target: &str, reason: &str) {
    tracing::warn!(
        event = "triple_rejected",
        source = %source,
        target = %target,
        reason = %reason,
        "triple rejected"
    );
}

/// Log a completed refinement.
pub fn refinement_completed(nodes: usize, edges: usize, triangles: usize) {
    tracing::info!(
        event = "refinement_completed",
        nodes,
        edges,
        triangles,
        "embedding refinement completed"
    );
}

/// Log analogy discovery results.
pub fn analogies_found(retained: usize, min_similarity: f64) {
    tracing::info!(
        event = "analogies_found",
        retained,
        min_similarity,
        "analogy discovery completed"
    );
}
