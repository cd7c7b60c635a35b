//! Graph analytics: centrality, components, and triangles, cached until the
//! next structural mutation.

mod betweenness;
mod closeness;
mod components;
mod pagerank;
mod topology;
mod triangles;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use topos_core::config::GraphConfig;
use tracing::info;

pub use triangles::Triangle;

use crate::graph::CausalGraph;
use topology::Topology;

/// Everything computed by one analytics pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphAnalytics {
    pub pagerank: HashMap<String, f64>,
    pub betweenness: HashMap<String, f64>,
    pub closeness: HashMap<String, f64>,
    /// Components treating edges as undirected.
    pub components: Vec<Vec<String>>,
    pub strongly_connected: Vec<Vec<String>>,
    pub triangles: Vec<Triangle>,
}

impl GraphAnalytics {
    /// Strongly connected components with more than one member.
    pub fn feedback_loops(&self) -> impl Iterator<Item = &Vec<String>> + '_ {
        self.strongly_connected.iter().filter(|scc| scc.len() > 1)
    }
}

impl CausalGraph {
    /// Cached analytics, or `None` if the graph changed since the last
    /// [`CausalGraph::refresh_analytics`].
    pub fn analytics(&self) -> Option<&GraphAnalytics> {
        self.analytics.as_ref()
    }

    /// Recompute and cache all analytics. Synchronous.
    pub fn refresh_analytics(&mut self, config: &GraphConfig) -> &GraphAnalytics {
        let topology = Topology::from_graph(self);
        let analytics = GraphAnalytics {
            pagerank: topology.keyed(pagerank::pagerank(
                &topology,
                config.pagerank_damping,
                config.pagerank_iterations,
            )),
            betweenness: topology.keyed(betweenness::betweenness(&topology)),
            closeness: topology.keyed(closeness::closeness(&topology)),
            components: components::connected_components(&topology),
            strongly_connected: components::strongly_connected_components(self),
            triangles: triangles::triangles(&topology),
        };
        info!(
            nodes = topology.len(),
            components = analytics.components.len(),
            feedback_loops = analytics.feedback_loops().count(),
            triangles = analytics.triangles.len(),
            generation = self.generation(),
            "graph analytics refreshed"
        );
        self.analytics.insert(analytics)
    }

    /// PageRank scores. See [`GraphConfig`] for damping and iteration count.
    pub fn pagerank(&self, config: &GraphConfig) -> HashMap<String, f64> {
        let topology = Topology::from_graph(self);
        topology.keyed(pagerank::pagerank(
            &topology,
            config.pagerank_damping,
            config.pagerank_iterations,
        ))
    }

    pub fn betweenness_centrality(&self) -> HashMap<String, f64> {
        let topology = Topology::from_graph(self);
        topology.keyed(betweenness::betweenness(&topology))
    }

    pub fn closeness_centrality(&self) -> HashMap<String, f64> {
        let topology = Topology::from_graph(self);
        topology.keyed(closeness::closeness(&topology))
    }

    pub fn connected_components(&self) -> Vec<Vec<String>> {
        components::connected_components(&Topology::from_graph(self))
    }

    pub fn strongly_connected_components(&self) -> Vec<Vec<String>> {
        components::strongly_connected_components(self)
    }

    pub fn find_triangles(&self) -> Vec<Triangle> {
        triangles::triangles(&Topology::from_graph(self))
    }
}
