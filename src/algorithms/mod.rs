/// Shortest path and centrality algorithms
///
/// This module implements the solvers that run over a `WeightedGraph`:
/// - `floyd_warshall`: all-pairs distances with a next-hop routing matrix
/// - `shortest_path`: single-source Dijkstra (reference linear scan and binary heap)
/// - `centrality`: center selection from an all-pairs distance matrix
///
/// None of the solvers validate against negative cycles (Floyd-Warshall) or
/// negative weights (Dijkstra); results on such graphs are meaningless.

pub mod centrality;
pub mod floyd_warshall;
pub mod shortest_path;

pub use centrality::{
    find_center, rank_vertices, require_center, vertex_scores, CentralityResult, VertexScore,
};
pub use floyd_warshall::{floyd_warshall, AllPairsShortestPaths};
pub use shortest_path::{
    dijkstra, dijkstra_heap, dijkstra_to, shortest_path, SingleSourceShortestPaths, VertexSets,
};

use crate::graph::GraphError;
use serde::Serialize;
use thiserror::Error;

/// Algorithm errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgorithmError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Vertex {vertex} out of range for {vertex_count} vertices")]
    OutOfRange { vertex: usize, vertex_count: usize },

    #[error("Target {target} is unreachable from {origin}")]
    UnreachableTarget { origin: usize, target: usize },

    #[error("No center: no vertex reaches every other vertex")]
    NoCenter,

    #[error("Negative cycle through vertex {0}; negative cycles are not supported")]
    NegativeCycleUnsupported(usize),
}

pub type AlgorithmResult<T> = Result<T, AlgorithmError>;

/// A reconstructed shortest path and its total cost
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPathResult {
    /// Path as a sequence of vertex indices, origin first
    pub path: Vec<usize>,
    /// Total cost/distance
    pub cost: f64,
}

impl ShortestPathResult {
    /// Number of edges on the path
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

pub(crate) fn check_index(vertex: usize, vertex_count: usize) -> AlgorithmResult<()> {
    if vertex < vertex_count {
        Ok(())
    } else {
        Err(AlgorithmError::OutOfRange {
            vertex,
            vertex_count,
        })
    }
}
