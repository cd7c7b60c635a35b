//! Turning causal triples into graph mutations.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use topos_core::errors::{GraphError, ToposResult};
use topos_core::models::{CausalTriple, Edge, Node};
use topos_graph::CausalGraph;
use uuid::Uuid;

static NON_ALNUM: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{N}]+").ok());

/// Counts from one ingestion call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub triples: usize,
    pub nodes_created: usize,
    pub edges_created: usize,
    /// Ids of the created edges, in triple order.
    pub edge_ids: Vec<String>,
}

impl IngestReport {
    pub(crate) fn merge(&mut self, other: IngestReport) {
        self.triples += other.triples;
        self.nodes_created += other.nodes_created;
        self.edges_created += other.edges_created;
        self.edge_ids.extend(other.edge_ids);
    }
}

/// Node id for a concept name: lowercased, runs of characters that are
/// neither Unicode letters nor digits collapsed to `_`, trimmed of leading
/// and trailing `_`.
pub fn concept_id(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let collapsed = match NON_ALNUM.as_ref() {
        Some(re) => re.replace_all(&lower, "_").into_owned(),
        None => lower
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect(),
    };
    collapsed.trim_matches('_').to_string()
}

/// Reject a triple before anything is written.
pub(crate) fn validate(triple: &CausalTriple) -> ToposResult<()> {
    for name in [&triple.source, &triple.target] {
        if concept_id(name).is_empty() {
            return Err(GraphError::InvalidConcept { name: name.clone() }.into());
        }
    }
    if !(0.0..=1.0).contains(&triple.confidence) {
        return Err(GraphError::InvalidConfidence {
            edge_id: format!("{} -> {}", triple.source, triple.target),
            value: triple.confidence,
        }
        .into());
    }
    Ok(())
}

/// Apply an already validated triple.
pub(crate) fn apply(graph: &mut CausalGraph, triple: &CausalTriple) -> ToposResult<IngestReport> {
    let mut report = IngestReport {
        triples: 1,
        ..IngestReport::default()
    };

    let source = ensure_concept(graph, &triple.source, triple.source_domain.as_deref(), &mut report)?;
    let target = ensure_concept(graph, &triple.target, triple.target_domain.as_deref(), &mut report)?;

    let mut provenance = triple.provenance.clone().unwrap_or_default();
    provenance.extracted_at.get_or_insert_with(Utc::now);

    let edge_id = Uuid::new_v4().to_string();
    let mut edge = Edge::new(edge_id.clone(), source, target, triple.relation)
        .with_confidence(triple.confidence);
    edge.provenance = Some(provenance);
    graph.add_edge(edge)?;

    report.edges_created = 1;
    report.edge_ids.push(edge_id);
    Ok(report)
}

/// Reuse or create the node for `name`. A missing domain on an existing
/// node is filled in; an existing domain is never overwritten.
fn ensure_concept(
    graph: &mut CausalGraph,
    name: &str,
    domain: Option<&str>,
    report: &mut IngestReport,
) -> ToposResult<String> {
    let id = concept_id(name);
    match graph.node(&id).map(|node| node.domain.is_none()) {
        Some(untagged) => {
            if untagged && domain.is_some() {
                graph.set_domain(&id, domain.map(str::to_string))?;
            }
        }
        None => {
            let mut node = Node::new(id.clone(), name.trim());
            node.domain = domain.map(str::to_string);
            graph.add_node(node)?;
            report.nodes_created += 1;
        }
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use topos_core::models::RelationKind;

    use super::*;

    #[test]
    fn concept_ids_are_slugs() {
        assert_eq!(concept_id("Interest Rates"), "interest_rates");
        assert_eq!(concept_id("  CO2 -- emissions!! "), "co2_emissions");
        assert_eq!(concept_id("Plant Growth"), "plant_growth");
        assert_eq!(concept_id("***"), "");
    }

    #[test]
    fn concept_ids_keep_non_ascii_letters() {
        assert_eq!(concept_id("経済"), "経済");
        assert_eq!(concept_id("Café"), "café");
        assert_eq!(concept_id("Cafè"), "cafè");
        assert_eq!(concept_id("Ölpreis / Inflation"), "ölpreis_inflation");
        assert!(validate(&CausalTriple::new("経済", RelationKind::Causes, "Inflation", 0.5)).is_ok());
    }

    #[test]
    fn accented_near_duplicates_stay_distinct() {
        let mut graph = CausalGraph::new();
        apply(&mut graph, &CausalTriple::new("Café", RelationKind::Causes, "x", 0.5)).unwrap();
        apply(&mut graph, &CausalTriple::new("Cafè", RelationKind::Causes, "y", 0.5)).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.node("café").unwrap().label, "Café");
        assert_eq!(graph.node("cafè").unwrap().label, "Cafè");
    }

    #[test]
    fn validation_rejects_bad_confidence_and_names() {
        assert!(validate(&CausalTriple::new("a", RelationKind::Causes, "b", 1.2)).is_err());
        assert!(validate(&CausalTriple::new("?!", RelationKind::Causes, "b", 0.5)).is_err());
        assert!(validate(&CausalTriple::new("a", RelationKind::Causes, "b", 0.5)).is_ok());
    }

    #[test]
    fn existing_domain_is_kept_missing_domain_is_filled() {
        let mut graph = CausalGraph::new();
        let t1 = CausalTriple::new("Rain", RelationKind::Causes, "Flood", 0.9);
        apply(&mut graph, &t1).unwrap();
        assert!(graph.node("rain").unwrap().domain.is_none());

        let t2 = CausalTriple::new("Rain", RelationKind::Enables, "Crops", 0.6)
            .with_domains("weather", "agri");
        let report = apply(&mut graph, &t2).unwrap();
        assert_eq!(report.nodes_created, 1);
        assert_eq!(graph.node("rain").unwrap().domain.as_deref(), Some("weather"));

        let t3 = CausalTriple::new("Rain", RelationKind::Causes, "Mud", 0.6)
            .with_domains("hydro", "soil");
        apply(&mut graph, &t3).unwrap();
        assert_eq!(graph.node("rain").unwrap().domain.as_deref(), Some("weather"));

        let edge = graph.edge(&report.edge_ids[0]).unwrap();
        assert!(edge.provenance.as_ref().unwrap().extracted_at.is_some());
        assert_eq!(edge.confidence, Some(0.6));
    }
}
