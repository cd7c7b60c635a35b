//! # topos-engine
//!
//! [`ToposEngine`] owns the causal graph and wires the analytics core
//! together: triples in, annotated graph, complex summary, refined
//! embeddings, and ranked analogies out.

pub mod engine;
pub mod ingest;
pub mod report;

pub use engine::ToposEngine;
pub use ingest::{concept_id, IngestReport};
pub use report::EngineReport;
