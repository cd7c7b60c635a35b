//! Span definitions per operation: graph analytics, complex building,
//! refinement, slicing, and ingestion.

/// Create a graph analytics span.
#[macro_export]
macro_rules! graph_span {
    ($nodes:expr, $edges:expr) => {
        tracing::info_span!("topos.graph", nodes = $nodes, edges = $edges)
    };
}

/// Create a complex-building span.
#[macro_export]
macro_rules! complex_span {
    ($generation:expr) => {
        tracing::info_span!("topos.complex", generation = $generation)
    };
}

/// Create an embedding refinement span.
#[macro_export]
macro_rules! refine_span {
    ($nodes:expr, $dimension:expr) => {
        tracing::info_span!("topos.refine", nodes = $nodes, dimension = $dimension)
    };
}

/// Create a slice/functor span.
#[macro_export]
macro_rules! slice_span {
    ($min_similarity:expr) => {
        tracing::info_span!("topos.slices", min_similarity = $min_similarity)
    };
}

/// Create a triple ingestion span.
#[macro_export]
macro_rules! ingest_span {
    ($triples:expr) => {
        tracing::info_span!("topos.ingest", triples = $triples)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const GRAPH: &str = "topos.graph";
    pub const COMPLEX: &str = "topos.complex";
    pub const REFINE: &str = "topos.refine";
    pub const SLICES: &str = "topos.slices";
    pub const INGEST: &str = "topos.ingest";
}
