//! # topos-slices
//!
//! Partitions a causal graph by domain tag into slices, describes each node
//! by its role inside its slice, and searches for structure-preserving maps
//! (functors) between slices to surface cross-domain analogies.
//!
//! Nothing here is cached: every call recomputes from the graph.

pub mod analogy;
pub mod features;
pub mod functor;
pub mod manager;
pub mod slice;

pub use analogy::{AnalogyReport, ConceptPair};
pub use features::NodeFeatures;
pub use functor::{ObjectMatch, SliceFunctor};
pub use manager::SliceManager;
pub use slice::ToposSlice;
