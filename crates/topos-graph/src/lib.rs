//! # topos-graph
//!
//! The causal graph store. Nodes and edges live in a `petgraph::StableGraph`
//! arena addressed by stable indices, with string id → index maps on top.
//! Traversal, causal queries, centrality analytics, and triangle enumeration.

pub mod analytics;
pub mod graph;
pub mod snapshot;
pub mod traversal;

pub use analytics::{GraphAnalytics, Triangle};
pub use graph::pruning::PruneResult;
pub use graph::CausalGraph;
pub use snapshot::{AnnotatedNode, GraphSnapshot, GraphStats};
