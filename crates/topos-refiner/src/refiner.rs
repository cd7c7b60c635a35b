//! EmbeddingRefiner: edge and triangle attention stacks plus the final
//! combining projection.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use topos_complex::SimplicialComplex;
use topos_core::config::RefinerConfig;
use topos_core::errors::{EmbeddingError, ToposResult};
use tracing::{debug, info, warn};

use crate::layers::{Linear, TransformerBlock};
use crate::progress::{ProgressReporter, RefinePhase};
use crate::scratch::ScratchPool;

/// Long-lived weights, released by [`EmbeddingRefiner::dispose`].
#[derive(Debug)]
struct RefinerWeights {
    edge_blocks: Vec<TransformerBlock>,
    triangle_blocks: Vec<TransformerBlock>,
    /// 2·dim → dim
    edge_projection: Linear,
    /// 3·dim → dim
    triangle_projection: Linear,
    /// 3·dim → dim
    output_projection: Linear,
}

impl RefinerWeights {
    fn init(config: &RefinerConfig) -> Self {
        let d = config.embedding_dim;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let stack = |rng: &mut StdRng| -> Vec<TransformerBlock> {
            (0..config.num_layers)
                .map(|_| {
                    TransformerBlock::new(
                        d,
                        config.hidden_dim,
                        config.num_heads,
                        config.use_layer_norm,
                        rng,
                    )
                })
                .collect()
        };
        let edge_blocks = stack(&mut rng);
        let triangle_blocks = stack(&mut rng);
        Self {
            edge_blocks,
            triangle_blocks,
            edge_projection: Linear::xavier(2 * d, d, &mut rng),
            triangle_projection: Linear::xavier(3 * d, d, &mut rng),
            output_projection: Linear::xavier(3 * d, d, &mut rng),
        }
    }

    fn param_count(&self) -> usize {
        self.edge_blocks
            .iter()
            .chain(&self.triangle_blocks)
            .map(TransformerBlock::param_count)
            .sum::<usize>()
            + self.edge_projection.param_count()
            + self.triangle_projection.param_count()
            + self.output_projection.param_count()
    }
}

/// Counts from one refinement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefineOutcome {
    pub edges_used: usize,
    pub edges_skipped: usize,
    pub triangles_used: usize,
    pub triangles_skipped: usize,
}

/// Refines node embeddings with attention over edges and triangles.
///
/// Weights are seeded from [`RefinerConfig::seed`] and never trained: two
/// refiners built from the same config produce identical outputs.
/// `dropout` is carried in the config but not applied.
#[derive(Debug)]
pub struct EmbeddingRefiner {
    config: RefinerConfig,
    weights: Option<RefinerWeights>,
    scratch: ScratchPool,
}

impl EmbeddingRefiner {
    pub fn new(config: RefinerConfig) -> ToposResult<Self> {
        validate(&config)?;
        let weights = RefinerWeights::init(&config);
        info!(
            dim = config.embedding_dim,
            heads = config.num_heads,
            layers = config.num_layers,
            params = weights.param_count(),
            seed = config.seed,
            "embedding refiner initialized"
        );
        Ok(Self {
            config,
            weights: Some(weights),
            scratch: ScratchPool::new(),
        })
    }

    pub fn config(&self) -> &RefinerConfig {
        &self.config
    }

    pub fn dimension(&self) -> usize {
        self.config.embedding_dim
    }

    pub fn is_disposed(&self) -> bool {
        self.weights.is_none()
    }

    /// Release all weight and scratch buffers. Every later call fails with
    /// [`EmbeddingError::Disposed`].
    pub fn dispose(&mut self) {
        if self.weights.take().is_some() {
            self.scratch.clear();
            debug!("embedding refiner disposed");
        }
    }

    /// Scratch leases still held. Zero between calls.
    pub fn scratch_outstanding(&self) -> usize {
        self.scratch.outstanding()
    }

    /// Final projection of `original ++ edge ++ triangle` to `dim`.
    pub fn project_node(
        &self,
        original: &[f32],
        edge_refinement: &[f32],
        triangle_refinement: &[f32],
    ) -> ToposResult<Vec<f32>> {
        let weights = self.weights()?;
        for (name, v) in [
            ("original", original),
            ("edge_refinement", edge_refinement),
            ("triangle_refinement", triangle_refinement),
        ] {
            self.check_dim(name, v.len())?;
        }
        Ok(self.combine(weights, original, edge_refinement, triangle_refinement))
    }

    /// Refine every embedding in `embeddings` using the structure of
    /// `complex`.
    ///
    /// Every vector must have the configured dimension; a mismatch fails
    /// before any computation. The result has exactly the input's keys.
    /// Edges and triangles with a member lacking an embedding are skipped.
    pub fn refine(
        &self,
        complex: &SimplicialComplex,
        embeddings: &HashMap<String, Vec<f32>>,
    ) -> ToposResult<HashMap<String, Vec<f32>>> {
        self.refine_with_outcome(complex, embeddings)
            .map(|(refined, _)| refined)
    }

    /// [`EmbeddingRefiner::refine`] plus the used/skipped simplex counts.
    pub fn refine_with_outcome(
        &self,
        complex: &SimplicialComplex,
        embeddings: &HashMap<String, Vec<f32>>,
    ) -> ToposResult<(HashMap<String, Vec<f32>>, RefineOutcome)> {
        let weights = self.weights()?;
        self.validate_inputs(embeddings)?;

        let (edge_refinement, edges_used, edges_skipped) =
            self.edge_pass(weights, complex, embeddings);
        let (triangle_refinement, triangles_used, triangles_skipped) =
            self.triangle_pass(weights, complex, embeddings);
        let refined = self.combine_all(weights, embeddings, &edge_refinement, &triangle_refinement);

        let outcome = RefineOutcome {
            edges_used,
            edges_skipped,
            triangles_used,
            triangles_skipped,
        };
        self.log_outcome(refined.len(), &outcome);
        Ok((refined, outcome))
    }

    /// [`EmbeddingRefiner::refine_with_outcome`] as a cooperative task that
    /// publishes checkpoints on `reporter` and yields between phases. Runs
    /// to completion or fails; there is no cancellation.
    pub async fn refine_with_progress(
        &self,
        complex: &SimplicialComplex,
        embeddings: &HashMap<String, Vec<f32>>,
        reporter: &ProgressReporter,
    ) -> ToposResult<(HashMap<String, Vec<f32>>, RefineOutcome)> {
        reporter.report(RefinePhase::Validating, 0);
        let weights = self.weights()?;
        self.validate_inputs(embeddings)?;
        tokio::task::yield_now().await;

        reporter.report(RefinePhase::EdgeAttention, 10);
        let (edge_refinement, edges_used, edges_skipped) =
            self.edge_pass(weights, complex, embeddings);
        tokio::task::yield_now().await;

        reporter.report(RefinePhase::TriangleAttention, 45);
        let (triangle_refinement, triangles_used, triangles_skipped) =
            self.triangle_pass(weights, complex, embeddings);
        tokio::task::yield_now().await;

        reporter.report(RefinePhase::Combining, 80);
        let refined = self.combine_all(weights, embeddings, &edge_refinement, &triangle_refinement);
        let outcome = RefineOutcome {
            edges_used,
            edges_skipped,
            triangles_used,
            triangles_skipped,
        };
        self.log_outcome(refined.len(), &outcome);
        reporter.report(RefinePhase::Complete, 100);
        Ok((refined, outcome))
    }

    fn weights(&self) -> ToposResult<&RefinerWeights> {
        self.weights
            .as_ref()
            .ok_or_else(|| EmbeddingError::Disposed.into())
    }

    fn check_dim(&self, node_id: &str, actual: usize) -> ToposResult<()> {
        if actual != self.config.embedding_dim {
            return Err(EmbeddingError::DimensionMismatch {
                node_id: node_id.to_string(),
                expected: self.config.embedding_dim,
                actual,
            }
            .into());
        }
        Ok(())
    }

    /// Checked in id order so the reported node is deterministic.
    fn validate_inputs(&self, embeddings: &HashMap<String, Vec<f32>>) -> ToposResult<()> {
        let mut ids: Vec<&String> = embeddings.keys().collect();
        ids.sort();
        for id in ids {
            self.check_dim(id, embeddings[id].len())?;
        }
        Ok(())
    }

    /// Per-node mean of the edge contributions attributed to it as source.
    fn edge_pass(
        &self,
        weights: &RefinerWeights,
        complex: &SimplicialComplex,
        embeddings: &HashMap<String, Vec<f32>>,
    ) -> (HashMap<String, Vec<f32>>, usize, usize) {
        let d = self.config.embedding_dim;
        let mut sums: HashMap<String, (Vec<f32>, usize)> = HashMap::new();
        let mut skipped = 0;
        let mut seq = self.scratch.lease(2 * d);
        let mut contribution = self.scratch.lease(d);

        for edge in complex.edges() {
            let (Some(src), Some(tgt)) = (embeddings.get(&edge.source), embeddings.get(&edge.target))
            else {
                warn!(edge_id = %edge.id, "edge skipped: endpoint has no embedding");
                skipped += 1;
                continue;
            };
            seq[..d].copy_from_slice(src);
            seq[d..].copy_from_slice(tgt);
            for block in &weights.edge_blocks {
                block.forward_in_place(&mut seq, 2, &self.scratch);
            }
            weights.edge_projection.forward_into(&seq, &mut contribution);
            accumulate(&mut sums, &edge.source, &contribution);
        }

        let used = complex.edges().len() - skipped;
        (finish_means(sums), used, skipped)
    }

    /// Per-node mean of the contributions of the triangles containing it.
    fn triangle_pass(
        &self,
        weights: &RefinerWeights,
        complex: &SimplicialComplex,
        embeddings: &HashMap<String, Vec<f32>>,
    ) -> (HashMap<String, Vec<f32>>, usize, usize) {
        let d = self.config.embedding_dim;
        let mut sums: HashMap<String, (Vec<f32>, usize)> = HashMap::new();
        let mut skipped = 0;
        let mut seq = self.scratch.lease(3 * d);
        let mut contribution = self.scratch.lease(d);

        'triangles: for triangle in complex.triangles() {
            for (slot, vertex) in triangle.vertices.iter().enumerate() {
                let Some(emb) = embeddings.get(vertex) else {
                    warn!(triangle = ?triangle.vertices, "triangle skipped: member has no embedding");
                    skipped += 1;
                    continue 'triangles;
                };
                seq[slot * d..(slot + 1) * d].copy_from_slice(emb);
            }
            for block in &weights.triangle_blocks {
                block.forward_in_place(&mut seq, 3, &self.scratch);
            }
            weights.triangle_projection.forward_into(&seq, &mut contribution);
            for vertex in &triangle.vertices {
                accumulate(&mut sums, vertex, &contribution);
            }
        }

        let used = complex.triangles().len() - skipped;
        (finish_means(sums), used, skipped)
    }

    fn combine_all(
        &self,
        weights: &RefinerWeights,
        embeddings: &HashMap<String, Vec<f32>>,
        edge_refinement: &HashMap<String, Vec<f32>>,
        triangle_refinement: &HashMap<String, Vec<f32>>,
    ) -> HashMap<String, Vec<f32>> {
        let zeros = vec![0.0; self.config.embedding_dim];
        embeddings
            .iter()
            .map(|(id, original)| {
                let edge = edge_refinement.get(id).unwrap_or(&zeros);
                let triangle = triangle_refinement.get(id).unwrap_or(&zeros);
                (id.clone(), self.combine(weights, original, edge, triangle))
            })
            .collect()
    }

    fn combine(
        &self,
        weights: &RefinerWeights,
        original: &[f32],
        edge: &[f32],
        triangle: &[f32],
    ) -> Vec<f32> {
        let d = self.config.embedding_dim;
        let mut concat = self.scratch.lease(3 * d);
        concat[..d].copy_from_slice(original);
        concat[d..2 * d].copy_from_slice(edge);
        concat[2 * d..].copy_from_slice(triangle);
        weights.output_projection.forward(&concat)
    }

    fn log_outcome(&self, nodes: usize, outcome: &RefineOutcome) {
        info!(
            nodes,
            edges = outcome.edges_used,
            edges_skipped = outcome.edges_skipped,
            triangles = outcome.triangles_used,
            triangles_skipped = outcome.triangles_skipped,
            "embeddings refined"
        );
    }
}

fn validate(config: &RefinerConfig) -> ToposResult<()> {
    let reason = if config.embedding_dim == 0 {
        "embedding_dim must be greater than 0"
    } else if config.hidden_dim == 0 {
        "hidden_dim must be greater than 0"
    } else if config.num_heads == 0 || config.embedding_dim % config.num_heads != 0 {
        "num_heads must be greater than 0 and divide embedding_dim"
    } else {
        return Ok(());
    };
    Err(EmbeddingError::InvalidConfig {
        reason: reason.to_string(),
    }
    .into())
}

fn accumulate(sums: &mut HashMap<String, (Vec<f32>, usize)>, id: &str, contribution: &[f32]) {
    let (sum, count) = sums
        .entry(id.to_string())
        .or_insert_with(|| (vec![0.0; contribution.len()], 0));
    for (s, c) in sum.iter_mut().zip(contribution) {
        *s += c;
    }
    *count += 1;
}

fn finish_means(sums: HashMap<String, (Vec<f32>, usize)>) -> HashMap<String, Vec<f32>> {
    sums.into_iter()
        .map(|(id, (mut sum, count))| {
            let inv = 1.0 / count as f32;
            sum.iter_mut().for_each(|s| *s *= inv);
            (id, sum)
        })
        .collect()
}
