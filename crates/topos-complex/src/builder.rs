//! ComplexBuilder: builds the complex, caches it per graph generation, and
//! applies the positional term to embeddings.

use std::collections::HashMap;

use topos_core::config::{ComplexConfig, PositionalEncoding};
use topos_graph::CausalGraph;
use tracing::{debug, info};

use crate::complex::{ComplexSummary, SimplicialComplex};
use crate::positional;

/// Builds and caches [`SimplicialComplex`] values.
#[derive(Debug, Default)]
pub struct ComplexBuilder {
    config: ComplexConfig,
    cache: Option<SimplicialComplex>,
}

impl ComplexBuilder {
    pub fn new(config: ComplexConfig) -> Self {
        Self {
            config,
            cache: None,
        }
    }

    pub fn config(&self) -> &ComplexConfig {
        &self.config
    }

    /// Build a fresh complex without touching the cache.
    pub fn build(&self, graph: &CausalGraph) -> SimplicialComplex {
        let complex = SimplicialComplex::from_graph(graph);
        debug!(
            generation = complex.generation(),
            vertices = complex.vertices().len(),
            edges = complex.edges().len(),
            triangles = complex.triangles().len(),
            "simplicial complex built"
        );
        complex
    }

    /// The cached complex if it was built from the graph's current generation.
    pub fn cached(&self, graph: &CausalGraph) -> Option<&SimplicialComplex> {
        self.cache
            .as_ref()
            .filter(|c| c.generation() == graph.generation())
    }

    /// Rebuild unless the cache already matches the graph's generation.
    pub fn refresh(&mut self, graph: &CausalGraph) -> &SimplicialComplex {
        let complex = match self.cache.take() {
            Some(complex) if complex.generation() == graph.generation() => complex,
            _ => {
                let complex = self.build(graph);
                info!(
                    generation = complex.generation(),
                    triangles = complex.triangles().len(),
                    "complex cache refreshed"
                );
                complex
            }
        };
        self.cache.insert(complex)
    }

    pub fn summary(&mut self, graph: &CausalGraph) -> ComplexSummary {
        self.refresh(graph).summary()
    }

    /// Add the scaled sinusoidal term to every embedding whose node is a
    /// vertex of `complex`, keyed by the vertex's insertion rank. Other
    /// entries pass through unchanged, as does everything when the encoding
    /// is disabled.
    pub fn encode_positions(
        &self,
        complex: &SimplicialComplex,
        embeddings: &HashMap<String, Vec<f32>>,
    ) -> HashMap<String, Vec<f32>> {
        encode(&self.config, complex, embeddings)
    }

    /// [`ComplexBuilder::refresh`] followed by
    /// [`ComplexBuilder::encode_positions`] against the refreshed complex.
    pub fn refresh_encoded(
        &mut self,
        graph: &CausalGraph,
        embeddings: &HashMap<String, Vec<f32>>,
    ) -> (&SimplicialComplex, HashMap<String, Vec<f32>>) {
        let config = self.config.clone();
        let complex = self.refresh(graph);
        let encoded = encode(&config, complex, embeddings);
        (complex, encoded)
    }
}

fn encode(
    config: &ComplexConfig,
    complex: &SimplicialComplex,
    embeddings: &HashMap<String, Vec<f32>>,
) -> HashMap<String, Vec<f32>> {
    embeddings
        .iter()
        .map(|(id, emb)| {
            let encoded = match (config.positional_encoding, complex.position_of(id)) {
                (PositionalEncoding::InsertionOrder, Some(pos)) => {
                    positional::add_scaled(emb, pos, config.positional_scale)
                }
                _ => emb.clone(),
            };
            (id.clone(), encoded)
        })
        .collect()
}
