/// Structural graph violations. Always fatal for the offending call.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },

    #[error("duplicate edge id: {id}")]
    DuplicateEdge { id: String },

    #[error("edge {edge_id} references missing node {node_id}")]
    MissingEndpoint { edge_id: String, node_id: String },

    #[error("edge {edge_id} has confidence {value} outside [0, 1]")]
    InvalidConfidence { edge_id: String, value: f64 },

    #[error("concept name {name:?} normalizes to an empty node id")]
    InvalidConcept { name: String },
}
