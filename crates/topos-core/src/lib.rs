//! # topos-core
//!
//! Foundation crate for the Topos causal analytics workspace.
//! Defines the data model, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;

// Re-export the most commonly used types at the crate root.
pub use config::ToposConfig;
pub use errors::{ToposError, ToposResult};
pub use models::{CausalTriple, Edge, Node, Provenance, RelationKind};
