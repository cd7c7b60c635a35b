//! # topos-refiner
//!
//! The geometric transformer. Refines node embeddings by running small
//! transformer stacks over every edge (length-2 sequences) and every
//! triangle (length-3 sequences) of a simplicial complex, then projecting
//! (original, edge, triangle) back to the embedding dimension.
//!
//! Weights are drawn once from a seeded RNG and never trained, so the
//! refiner is a fixed, deterministic structural-feature transform.

pub mod layers;
pub mod progress;
pub mod refiner;
pub mod scratch;

pub use progress::{ProgressCheckpoint, ProgressReporter, RefinePhase};
pub use refiner::{EmbeddingRefiner, RefineOutcome};
pub use scratch::{Lease, ScratchPool};
