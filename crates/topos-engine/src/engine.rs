//! The engine facade. Owns one graph and the stateful pieces built from it.

use std::collections::HashMap;
use std::path::Path;

use topos_complex::{ComplexBuilder, ComplexSummary};
use topos_core::config::ToposConfig;
use topos_core::errors::{EmbeddingError, ToposError, ToposResult};
use topos_core::models::CausalTriple;
use topos_graph::traversal::paths::CausalPath;
use topos_graph::{CausalGraph, GraphSnapshot, GraphStats, PruneResult};
use topos_observability::tracing_setup::events;
use topos_observability::{complex_span, graph_span, ingest_span, refine_span, slice_span};
use topos_refiner::{EmbeddingRefiner, ProgressReporter, RefineOutcome};
use topos_slices::{AnalogyReport, SliceManager};
use tracing::{debug, Instrument};

use crate::ingest::{self, IngestReport};
use crate::report::EngineReport;

/// Causal analytics over a single graph.
///
/// Mutations go through [`ToposEngine::ingest`] or [`ToposEngine::graph_mut`];
/// derived state (analytics, complex) is rebuilt lazily on the next query
/// that needs it.
pub struct ToposEngine {
    config: ToposConfig,
    graph: CausalGraph,
    complex: ComplexBuilder,
    refiner: EmbeddingRefiner,
    slices: SliceManager,
}

impl ToposEngine {
    /// Validate `config` and build every component from it.
    pub fn new(config: ToposConfig) -> ToposResult<Self> {
        config.validate()?;
        let refiner = EmbeddingRefiner::new(config.refiner.clone())?;
        Ok(Self {
            complex: ComplexBuilder::new(config.complex.clone()),
            slices: SliceManager::new(config.slices.clone()),
            graph: CausalGraph::new(),
            refiner,
            config,
        })
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> ToposResult<Self> {
        Self::new(ToposConfig::from_file(path)?)
    }

    pub fn config(&self) -> &ToposConfig {
        &self.config
    }

    pub fn graph(&self) -> &CausalGraph {
        &self.graph
    }

    /// Direct graph access. Structural edits invalidate cached analytics.
    pub fn graph_mut(&mut self) -> &mut CausalGraph {
        &mut self.graph
    }

    pub fn refiner(&self) -> &EmbeddingRefiner {
        &self.refiner
    }

    // --- Ingestion ---

    pub fn ingest_triple(&mut self, triple: &CausalTriple) -> ToposResult<IngestReport> {
        self.ingest(std::slice::from_ref(triple))
    }

    /// Ingest a batch. Every triple is validated before the first one is
    /// applied, so a rejected batch leaves the graph untouched.
    pub fn ingest(&mut self, triples: &[CausalTriple]) -> ToposResult<IngestReport> {
        let _span = ingest_span!(triples.len()).entered();

        for triple in triples {
            if let Err(err) = ingest::validate(triple) {
                events::triple_rejected(&triple.source, &triple.target, &err.to_string());
                return Err(err);
            }
        }

        let mut report = IngestReport::default();
        for triple in triples {
            report.merge(ingest::apply(&mut self.graph, triple)?);
        }
        events::triples_ingested(report.triples, report.nodes_created, report.edges_created);
        Ok(report)
    }

    /// Attach an embedding to a node. The vector must match the refiner's
    /// dimension.
    pub fn set_embedding(&mut self, id: &str, embedding: Vec<f32>) -> ToposResult<()> {
        if !self.graph.contains_node(id) {
            return Err(ToposError::NodeNotFound { id: id.to_string() });
        }
        let expected = self.refiner.dimension();
        if embedding.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                node_id: id.to_string(),
                expected,
                actual: embedding.len(),
            }
            .into());
        }
        self.graph.set_embedding(id, Some(embedding))
    }

    // --- Analytics ---

    /// Recompute graph analytics and the complex cache if stale.
    pub fn refresh(&mut self) -> ComplexSummary {
        if self.graph.analytics().is_none() {
            let _span = graph_span!(self.graph.node_count(), self.graph.edge_count()).entered();
            self.graph.refresh_analytics(&self.config.graph);
        }
        let _span = complex_span!(self.graph.generation()).entered();
        self.complex.refresh(&self.graph).summary()
    }

    /// Annotated listing with centrality scores for the current generation.
    pub fn snapshot(&mut self) -> GraphSnapshot {
        self.refresh();
        self.graph.snapshot()
    }

    pub fn stats(&self) -> GraphStats {
        self.graph.stats()
    }

    pub fn complex_summary(&mut self) -> ComplexSummary {
        let _span = complex_span!(self.graph.generation()).entered();
        self.complex.summary(&self.graph)
    }

    /// Simple causal paths up to the configured depth.
    pub fn find_causal_paths(&self, from: &str, to: &str) -> Vec<CausalPath> {
        self.graph
            .find_causal_paths(from, to, self.config.graph.max_path_depth)
    }

    /// Strongly connected components with more than one member.
    pub fn feedback_loops(&mut self) -> Vec<Vec<String>> {
        self.refresh();
        self.graph
            .analytics()
            .map(|a| a.feedback_loops().cloned().collect())
            .unwrap_or_default()
    }

    pub fn prune(&mut self, min_confidence: f64) -> PruneResult {
        self.graph.prune_weak_edges(min_confidence)
    }

    // --- Refinement ---

    /// Refine every attached embedding against the current complex.
    ///
    /// Positional encoding is applied first when enabled. Nodes without an
    /// embedding are absent from the result; the graph is not modified.
    pub async fn refine_embeddings(
        &mut self,
        reporter: Option<&ProgressReporter>,
    ) -> ToposResult<(HashMap<String, Vec<f32>>, RefineOutcome)> {
        let embeddings: HashMap<String, Vec<f32>> = self
            .graph
            .nodes()
            .filter_map(|n| n.embedding.clone().map(|e| (n.id.clone(), e)))
            .collect();

        let (complex, encoded) = self.complex.refresh_encoded(&self.graph, &embeddings);

        let span = refine_span!(encoded.len(), self.refiner.dimension());
        let (refined, outcome) = match reporter {
            None => span.in_scope(|| self.refiner.refine_with_outcome(complex, &encoded))?,
            Some(reporter) => {
                self.refiner
                    .refine_with_progress(complex, &encoded, reporter)
                    .instrument(span)
                    .await?
            }
        };
        events::refinement_completed(refined.len(), outcome.edges_used, outcome.triangles_used);
        Ok((refined, outcome))
    }

    /// Refine and store the results as each node's embedding.
    pub async fn refine_in_place(
        &mut self,
        reporter: Option<&ProgressReporter>,
    ) -> ToposResult<RefineOutcome> {
        let (refined, outcome) = self.refine_embeddings(reporter).await?;
        for (id, embedding) in refined {
            self.graph.set_embedding(&id, Some(embedding))?;
        }
        debug!(edges_used = outcome.edges_used, "refined embeddings stored");
        Ok(outcome)
    }

    // --- Analogies ---

    /// Domain pairs whose functor similarity reaches `min_similarity`,
    /// best first.
    pub fn find_analogies(&self, min_similarity: f64) -> Vec<AnalogyReport> {
        let _span = slice_span!(min_similarity).entered();
        let reports = self.slices.find_analogies(&self.graph, min_similarity);
        events::analogies_found(reports.len(), min_similarity);
        reports
    }

    /// Everything the visualization layer consumes in one document.
    pub fn report(&mut self, min_similarity: f64) -> EngineReport {
        let complex = self.refresh();
        EngineReport {
            stats: self.graph.stats(),
            complex,
            feedback_loops: self.feedback_loops(),
            analogies: self.find_analogies(min_similarity),
        }
    }
}
