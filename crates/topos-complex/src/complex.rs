//! The simplicial complex: 0-, 1-, and 2-simplices plus their features.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use topos_core::models::RelationKind;
use topos_graph::{CausalGraph, Triangle};

use crate::clustering::local_clustering;
use crate::features::{self, EdgeFeatures, TriangleFeatures};
use crate::matrix::DenseMatrix;

/// A 1-simplex. Keeps the edge's direction and kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub relation: RelationKind,
}

/// Headline statistics for the downstream visualization layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexSummary {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub triangle_count: usize,
    /// Directed density: edges over n(n-1).
    pub density: f64,
    pub average_clustering: f64,
}

/// Vertices, edges, and triangles of a graph at one generation.
///
/// Vertices are listed in graph insertion order; matrix rows and columns
/// follow the same order.
#[derive(Debug, Clone)]
pub struct SimplicialComplex {
    generation: u64,
    vertices: Vec<String>,
    position: HashMap<String, usize>,
    degrees: Vec<usize>,
    edges: Vec<ComplexEdge>,
    triangles: Vec<Triangle>,
    edge_features: Vec<EdgeFeatures>,
    triangle_features: Vec<TriangleFeatures>,
    local_clustering: Vec<f64>,
    density: f64,
}

impl SimplicialComplex {
    pub(crate) fn from_graph(graph: &CausalGraph) -> Self {
        let vertices: Vec<String> = graph.nodes().map(|n| n.id.clone()).collect();
        let position = vertices
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        let degrees = vertices.iter().map(|id| graph.degree(id)).collect();
        let local_clustering = vertices
            .iter()
            .map(|id| local_clustering(graph, id))
            .collect();

        let edges: Vec<ComplexEdge> = graph
            .edges()
            .map(|e| ComplexEdge {
                id: e.id.clone(),
                source: e.source.clone(),
                target: e.target.clone(),
                relation: e.relation,
            })
            .collect();
        let edge_features = graph
            .edges()
            .map(|e| features::edge_features(graph, e))
            .collect();

        // Reuse cached triangles when the analytics pass already ran.
        let triangles = graph
            .analytics()
            .map(|a| a.triangles.clone())
            .unwrap_or_else(|| graph.find_triangles());
        let triangle_features = triangles
            .iter()
            .map(|t| features::triangle_features(graph, t))
            .collect();

        Self {
            generation: graph.generation(),
            vertices,
            position,
            degrees,
            edges,
            triangles,
            edge_features,
            triangle_features,
            local_clustering,
            density: graph.stats().density,
        }
    }

    /// Graph generation this complex was built from.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn vertices(&self) -> &[String] {
        &self.vertices
    }

    pub fn edges(&self) -> &[ComplexEdge] {
        &self.edges
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Parallel to [`SimplicialComplex::edges`].
    pub fn edge_features(&self) -> &[EdgeFeatures] {
        &self.edge_features
    }

    /// Parallel to [`SimplicialComplex::triangles`].
    pub fn triangle_features(&self) -> &[TriangleFeatures] {
        &self.triangle_features
    }

    /// Row/column of `id` in every matrix.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.position.get(id).copied()
    }

    pub fn local_clustering(&self, id: &str) -> Option<f64> {
        self.position_of(id).map(|i| self.local_clustering[i])
    }

    /// Mean local clustering over all vertices.
    pub fn average_clustering(&self) -> f64 {
        if self.vertices.is_empty() {
            return 0.0;
        }
        self.local_clustering.iter().sum::<f64>() / self.vertices.len() as f64
    }

    pub fn summary(&self) -> ComplexSummary {
        ComplexSummary {
            vertex_count: self.vertices.len(),
            edge_count: self.edges.len(),
            triangle_count: self.triangles.len(),
            density: self.density,
            average_clustering: self.average_clustering(),
        }
    }

    /// Binary directed adjacency: `A[i][j] = 1` when some edge runs i → j.
    pub fn adjacency_matrix(&self) -> DenseMatrix {
        let n = self.vertices.len();
        let mut a = DenseMatrix::zeros(n, n);
        for (s, t) in self.endpoint_positions() {
            a.set(s, t, 1.0);
        }
        a
    }

    /// Diagonal matrix of total (in + out) degree.
    pub fn degree_matrix(&self) -> DenseMatrix {
        let n = self.vertices.len();
        let mut d = DenseMatrix::zeros(n, n);
        for (i, &deg) in self.degrees.iter().enumerate() {
            d.set(i, i, deg as f64);
        }
        d
    }

    /// `I - D^(-1/2) S D^(-1/2)` where `S` is the symmetrized adjacency
    /// without self-loops and `D` its degree. Isolated vertices keep a 1 on
    /// the diagonal.
    pub fn normalized_laplacian(&self) -> DenseMatrix {
        let n = self.vertices.len();
        let mut undirected: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
        for (s, t) in self.endpoint_positions() {
            if s != t {
                undirected[s].insert(t);
                undirected[t].insert(s);
            }
        }
        let inv_sqrt: Vec<f64> = undirected
            .iter()
            .map(|nbrs| {
                if nbrs.is_empty() {
                    0.0
                } else {
                    1.0 / (nbrs.len() as f64).sqrt()
                }
            })
            .collect();

        let mut l = DenseMatrix::identity(n);
        for (i, nbrs) in undirected.iter().enumerate() {
            for &j in nbrs {
                l.set(i, j, -inv_sqrt[i] * inv_sqrt[j]);
            }
        }
        l
    }

    /// Edges × vertices, +1 at the source column and -1 at the target
    /// column. A self-loop row nets to zero.
    pub fn incidence_matrix(&self) -> DenseMatrix {
        let mut b = DenseMatrix::zeros(self.edges.len(), self.vertices.len());
        for (row, (s, t)) in self.endpoint_positions().enumerate() {
            b.add(row, s, 1.0);
            b.add(row, t, -1.0);
        }
        b
    }

    /// Indices of the triangles containing `id`.
    pub fn triangles_containing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.triangles
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.contains(id))
            .map(|(i, _)| i)
    }

    fn endpoint_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        // Every edge endpoint is a vertex of the same generation.
        self.edges.iter().filter_map(|e| {
            Some((self.position_of(&e.source)?, self.position_of(&e.target)?))
        })
    }
}
