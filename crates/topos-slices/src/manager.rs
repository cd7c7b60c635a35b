//! SliceManager: partitioning, features, functors, and analogy ranking.

use std::cmp::Ordering;

use topos_core::config::SliceConfig;
use topos_core::errors::{ToposError, ToposResult};
use topos_graph::CausalGraph;
use tracing::{debug, info};

use crate::analogy::{AnalogyReport, ConceptPair};
use crate::features::NodeFeatures;
use crate::functor::{self, SliceFunctor};
use crate::slice::ToposSlice;

/// Stateless apart from its config. Cost is O(domain pairs × nodes²) per
/// [`SliceManager::find_analogies`] call.
#[derive(Debug, Clone, Default)]
pub struct SliceManager {
    config: SliceConfig,
}

impl SliceManager {
    pub fn new(config: SliceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SliceConfig {
        &self.config
    }

    /// One slice per domain tag, ordered by first appearance in node
    /// insertion order. Untagged nodes belong to no slice.
    pub fn slices(&self, graph: &CausalGraph) -> Vec<ToposSlice> {
        let mut slices: Vec<ToposSlice> = Vec::new();
        for node in graph.nodes() {
            let Some(domain) = node.domain.as_deref() else {
                continue;
            };
            match slices.iter_mut().find(|s| s.domain == domain) {
                Some(slice) => slice.objects.push(node.id.clone()),
                None => slices.push(ToposSlice {
                    domain: domain.to_string(),
                    objects: vec![node.id.clone()],
                    morphisms: Vec::new(),
                }),
            }
        }

        for edge in graph.edges() {
            let domain_of = |id: &str| graph.node(id).and_then(|n| n.domain.as_deref());
            if let (Some(s), Some(t)) = (domain_of(&edge.source), domain_of(&edge.target)) {
                if s == t {
                    if let Some(slice) = slices.iter_mut().find(|sl| sl.domain == s) {
                        slice.morphisms.push(edge.clone());
                    }
                }
            }
        }

        debug!(slices = slices.len(), "graph partitioned by domain");
        slices
    }

    /// The slice for `domain`.
    pub fn slice(&self, graph: &CausalGraph, domain: &str) -> ToposResult<ToposSlice> {
        self.slices(graph)
            .into_iter()
            .find(|s| s.domain == domain)
            .ok_or_else(|| ToposError::SliceNotFound {
                domain: domain.to_string(),
            })
    }

    /// Features of every object of `slice`, in slice order.
    pub fn node_features(&self, slice: &ToposSlice) -> Vec<NodeFeatures> {
        slice
            .objects
            .iter()
            .map(|id| NodeFeatures::compute(slice, id, self.config.hub_degree_threshold))
            .collect()
    }

    /// Greedy functor from `source` to `target`.
    pub fn compute_functor(&self, source: &ToposSlice, target: &ToposSlice) -> SliceFunctor {
        functor::build(
            source,
            target,
            &self.node_features(source),
            &self.node_features(target),
            &self.config,
        )
    }

    /// Functor between two domains of `graph`.
    pub fn functor_between(
        &self,
        graph: &CausalGraph,
        source_domain: &str,
        target_domain: &str,
    ) -> ToposResult<SliceFunctor> {
        let source = self.slice(graph, source_domain)?;
        let target = self.slice(graph, target_domain)?;
        Ok(self.compute_functor(&source, &target))
    }

    /// Compute a functor for every unordered pair of slices (earlier slice
    /// as source) and keep those with at least one matched object and
    /// similarity at or above `min_similarity`. Reports and their concept
    /// pairs are sorted by similarity, highest first; ties keep slice order.
    pub fn find_analogies(&self, graph: &CausalGraph, min_similarity: f64) -> Vec<AnalogyReport> {
        let slices = self.slices(graph);
        let features: Vec<Vec<NodeFeatures>> =
            slices.iter().map(|s| self.node_features(s)).collect();

        let mut reports = Vec::new();
        let mut considered = 0usize;
        for i in 0..slices.len() {
            for j in i + 1..slices.len() {
                considered += 1;
                let functor =
                    functor::build(&slices[i], &slices[j], &features[i], &features[j], &self.config);
                if functor.is_empty() || functor.similarity < min_similarity {
                    continue;
                }
                reports.push(self.report(graph, functor));
            }
        }

        reports.sort_by(|a, b| descending(a.similarity, b.similarity));
        info!(
            domain_pairs = considered,
            retained = reports.len(),
            min_similarity,
            "analogies computed"
        );
        reports
    }

    fn report(&self, graph: &CausalGraph, functor: SliceFunctor) -> AnalogyReport {
        let label = |id: &str| {
            graph
                .node(id)
                .map_or_else(|| id.to_string(), |n| n.label.clone())
        };
        let mut pairs: Vec<ConceptPair> = functor
            .object_map
            .iter()
            .map(|m| ConceptPair {
                source_id: m.source_id.clone(),
                source_label: label(&m.source_id),
                target_id: m.target_id.clone(),
                target_label: label(&m.target_id),
                similarity: m.similarity,
            })
            .collect();
        pairs.sort_by(|a, b| descending(a.similarity, b.similarity));

        AnalogyReport {
            source_domain: functor.source_domain,
            target_domain: functor.target_domain,
            similarity: functor.similarity,
            pairs,
        }
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
