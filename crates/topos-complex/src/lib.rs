//! # topos-complex
//!
//! Lifts a [`topos_graph::CausalGraph`] into a simplicial complex: vertices,
//! edges, and the triangles closed by edges in either direction. Carries the
//! per-edge and per-triangle structural features, the standard graph
//! matrices, clustering coefficients, and the positional term added to
//! embeddings before refinement.

pub mod builder;
pub mod clustering;
pub mod complex;
pub mod features;
pub mod matrix;
pub mod positional;

pub use builder::ComplexBuilder;
pub use complex::{ComplexEdge, ComplexSummary, SimplicialComplex};
pub use features::{EdgeFeatures, TriangleFeatures};
pub use matrix::DenseMatrix;
