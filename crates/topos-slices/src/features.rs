//! Per-node structural role inside a slice.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use topos_core::models::RelationKind;

use crate::slice::ToposSlice;

/// Degrees, relation-kind counts, and role flags of one node, counted over
/// its slice's internal edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeFeatures {
    pub node_id: String,
    pub in_degree: usize,
    pub out_degree: usize,
    pub degree: usize,
    pub incoming: BTreeMap<RelationKind, usize>,
    pub outgoing: BTreeMap<RelationKind, usize>,
    pub is_hub: bool,
    pub is_source: bool,
    pub is_sink: bool,
}

impl NodeFeatures {
    pub fn compute(slice: &ToposSlice, node_id: &str, hub_degree_threshold: usize) -> Self {
        let mut incoming: BTreeMap<RelationKind, usize> = BTreeMap::new();
        let mut outgoing: BTreeMap<RelationKind, usize> = BTreeMap::new();
        for edge in &slice.morphisms {
            if edge.target == node_id {
                *incoming.entry(edge.relation).or_default() += 1;
            }
            if edge.source == node_id {
                *outgoing.entry(edge.relation).or_default() += 1;
            }
        }
        let in_degree: usize = incoming.values().sum();
        let out_degree: usize = outgoing.values().sum();
        let degree = in_degree + out_degree;

        Self {
            node_id: node_id.to_string(),
            in_degree,
            out_degree,
            degree,
            incoming,
            outgoing,
            is_hub: degree > hub_degree_threshold,
            is_source: in_degree == 0 && out_degree > 0,
            is_sink: out_degree == 0 && in_degree > 0,
        }
    }

    pub fn incoming_kinds(&self) -> BTreeSet<RelationKind> {
        self.incoming.keys().copied().collect()
    }

    pub fn outgoing_kinds(&self) -> BTreeSet<RelationKind> {
        self.outgoing.keys().copied().collect()
    }

    /// `1 - |d1 - d2| / max(d1, d2)`, 1 when both are 0.
    pub fn degree_similarity(&self, other: &Self) -> f64 {
        let max = self.degree.max(other.degree);
        if max == 0 {
            return 1.0;
        }
        1.0 - self.degree.abs_diff(other.degree) as f64 / max as f64
    }

    /// Fraction of the hub/source/sink flags that agree.
    pub fn role_similarity(&self, other: &Self) -> f64 {
        let agree = [
            self.is_hub == other.is_hub,
            self.is_source == other.is_source,
            self.is_sink == other.is_sink,
        ]
        .iter()
        .filter(|same| **same)
        .count();
        agree as f64 / 3.0
    }

    /// Mean Jaccard of the incoming and outgoing kind sets.
    pub fn relation_similarity(&self, other: &Self) -> f64 {
        let incoming = jaccard(&self.incoming_kinds(), &other.incoming_kinds());
        let outgoing = jaccard(&self.outgoing_kinds(), &other.outgoing_kinds());
        (incoming + outgoing) / 2.0
    }
}

/// Jaccard index; two empty sets are identical.
fn jaccard(a: &BTreeSet<RelationKind>, b: &BTreeSet<RelationKind>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 1.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
