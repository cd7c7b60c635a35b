//! Greedy functor construction between two slices.
//!
//! Objects are matched greedily in source enumeration order, each taking the
//! best still-unclaimed target. The result depends on that order and is not a
//! globally optimal assignment. An optimal matcher could replace
//! [`match_objects`] without changing [`SliceFunctor`].

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use topos_core::config::SliceConfig;

use crate::features::NodeFeatures;
use crate::slice::ToposSlice;

/// One source object mapped to one target object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectMatch {
    pub source_id: String,
    pub target_id: String,
    pub similarity: f64,
}

/// A partial, injective object map plus the morphisms it induces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceFunctor {
    pub source_domain: String,
    pub target_domain: String,
    /// In source enumeration order.
    pub object_map: Vec<ObjectMatch>,
    /// Source edge id → target edge id.
    pub morphism_map: Vec<(String, String)>,
    /// Matched source objects over all source objects (0 when none).
    pub object_coverage: f64,
    /// Mapped source morphisms over all source morphisms (0 when none).
    pub morphism_coverage: f64,
    /// Mean of the two coverages, in [0, 1].
    pub similarity: f64,
}

impl SliceFunctor {
    pub fn target_of(&self, source_id: &str) -> Option<&str> {
        self.object_map
            .iter()
            .find(|m| m.source_id == source_id)
            .map(|m| m.target_id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.object_map.is_empty()
    }
}

/// Weighted feature similarity of two nodes.
pub fn feature_similarity(a: &NodeFeatures, b: &NodeFeatures, config: &SliceConfig) -> f64 {
    config.degree_weight * a.degree_similarity(b)
        + config.role_weight * a.role_similarity(b)
        + config.relation_weight * a.relation_similarity(b)
}

/// Greedy assignment: each source takes its most similar unclaimed target,
/// provided that similarity exceeds `config.min_match_similarity`. Ties go
/// to the earlier target.
pub fn match_objects(
    source: &[NodeFeatures],
    target: &[NodeFeatures],
    config: &SliceConfig,
) -> Vec<ObjectMatch> {
    let mut claimed = vec![false; target.len()];
    let mut matches = Vec::new();

    for s in source {
        let best = target
            .iter()
            .enumerate()
            .filter(|(j, _)| !claimed[*j])
            .map(|(j, t)| (j, feature_similarity(s, t, config)))
            .fold(None, |best: Option<(usize, f64)>, (j, sim)| match best {
                Some((_, best_sim)) if best_sim >= sim => best,
                _ => Some((j, sim)),
            });

        if let Some((j, similarity)) = best.filter(|(_, sim)| *sim > config.min_match_similarity) {
            claimed[j] = true;
            matches.push(ObjectMatch {
                source_id: s.node_id.clone(),
                target_id: target[j].node_id.clone(),
                similarity,
            });
        }
    }
    matches
}

/// Map each source edge whose endpoints are both matched to a target edge
/// with the mapped endpoints and the same relation kind, if one exists.
pub fn map_morphisms(
    source: &ToposSlice,
    target: &ToposSlice,
    object_map: &[ObjectMatch],
) -> Vec<(String, String)> {
    let image: HashMap<&str, &str> = object_map
        .iter()
        .map(|m| (m.source_id.as_str(), m.target_id.as_str()))
        .collect();

    source
        .morphisms
        .iter()
        .filter_map(|edge| {
            let s = image.get(edge.source.as_str())?;
            let t = image.get(edge.target.as_str())?;
            target
                .morphisms
                .iter()
                .find(|e| e.source == *s && e.target == *t && e.relation == edge.relation)
                .map(|e| (edge.id.clone(), e.id.clone()))
        })
        .collect()
}

pub(crate) fn build(
    source: &ToposSlice,
    target: &ToposSlice,
    source_features: &[NodeFeatures],
    target_features: &[NodeFeatures],
    config: &SliceConfig,
) -> SliceFunctor {
    let object_map = match_objects(source_features, target_features, config);
    let morphism_map = map_morphisms(source, target, &object_map);

    let object_coverage = fraction(object_map.len(), source.object_count());
    let morphism_coverage = fraction(morphism_map.len(), source.morphism_count());

    debug_assert_eq!(
        object_map.iter().map(|m| &m.target_id).collect::<HashSet<_>>().len(),
        object_map.len(),
        "object map must be injective"
    );

    SliceFunctor {
        source_domain: source.domain.clone(),
        target_domain: target.domain.clone(),
        object_map,
        morphism_map,
        object_coverage,
        morphism_coverage,
        similarity: (object_coverage + morphism_coverage) / 2.0,
    }
}

fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
