/// Weighted graph backed by a dense cost matrix
///
/// This module provides the graph representation every solver reads from:
/// - GraphOps trait: the edge insertion/removal/neighbor capability
/// - WeightedGraph: adjacency-matrix implementation, directed or undirected
///
/// Vertices are `0..vertex_count`. The diagonal is always zero and, for
/// undirected graphs, the matrix is kept symmetric by every mutation.

pub mod error;

pub use error::{GraphError, GraphResult};

use crate::types::{Distance, DistanceMatrix};
use std::ops::Range;

/// Edge-level capability shared by graph representations
pub trait GraphOps {
    /// Insert or overwrite edge `v -> w` (and `w -> v` when undirected)
    ///
    /// # Errors
    /// * `OutOfRange` if either endpoint is not a vertex
    /// * `SelfLoop` if `v == w`
    /// * `InvalidWeight` if the weight is NaN or infinite
    fn add_edge(&mut self, v: usize, w: usize, weight: f64) -> GraphResult<()>;

    /// Remove edge `v -> w` (and `w -> v` when undirected)
    ///
    /// # Errors
    /// * `OutOfRange` if either endpoint is not a vertex
    /// * `EdgeNotFound` if there was no such edge
    fn remove_edge(&mut self, v: usize, w: usize) -> GraphResult<()>;

    /// Lazily enumerate `(w, weight)` for every out-neighbor of `v`
    fn neighbors(&self, v: usize) -> GraphResult<Neighbors<'_>>;

    /// Insert an edge with the default unit weight
    fn add_unit_edge(&mut self, v: usize, w: usize) -> GraphResult<()> {
        self.add_edge(v, w, 1.0)
    }
}

/// Weighted graph stored as an adjacency (cost) matrix
///
/// `cost[(v, w)]` is the edge weight, or `Distance::Infinite` when there is
/// no edge. The graph owns its matrix exclusively and is never resized.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedGraph {
    directed: bool,
    edge_count: usize,
    cost: DistanceMatrix,
}

impl WeightedGraph {
    /// Create a graph with `vertex_count` vertices and no edges
    ///
    /// # Errors
    /// Returns `InvalidSize` if `vertex_count` is zero or its cost matrix
    /// cannot be allocated
    pub fn new(vertex_count: usize, directed: bool) -> GraphResult<Self> {
        if vertex_count == 0 {
            return Err(GraphError::InvalidSize(vertex_count));
        }

        let mut cost = DistanceMatrix::try_filled(vertex_count, Distance::Infinite)
            .ok_or(GraphError::InvalidSize(vertex_count))?;
        for v in 0..vertex_count {
            cost[(v, v)] = Distance::ZERO;
        }

        Ok(Self {
            directed,
            edge_count: 0,
            cost,
        })
    }

    pub fn undirected(vertex_count: usize) -> GraphResult<Self> {
        Self::new(vertex_count, false)
    }

    pub fn directed(vertex_count: usize) -> GraphResult<Self> {
        Self::new(vertex_count, true)
    }

    pub fn vertex_count(&self) -> usize {
        self.cost.size()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Number of edges; an undirected edge counts once
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// All vertex indices in ascending order
    pub fn vertices(&self) -> Range<usize> {
        0..self.vertex_count()
    }

    /// Borrow the cost matrix (read-only)
    pub fn cost_matrix(&self) -> &DistanceMatrix {
        &self.cost
    }

    /// Direct edge cost, `Infinite` if there is no edge
    pub fn cost(&self, v: usize, w: usize) -> GraphResult<Distance> {
        self.check_vertex(v)?;
        self.check_vertex(w)?;
        Ok(self.cost[(v, w)])
    }

    pub fn has_edge(&self, v: usize, w: usize) -> bool {
        v != w && matches!(self.cost.get(v, w), Some(Distance::Finite(_)))
    }

    /// Iterate edges as `(v, w, weight)`
    ///
    /// Undirected edges are reported once, with `v < w`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.vertices().flat_map(move |v| {
            self.cost
                .row(v)
                .iter()
                .enumerate()
                .filter(move |&(w, _)| w != v && (self.directed || v < w))
                .filter_map(move |(w, d)| d.value().map(|weight| (v, w, weight)))
        })
    }

    /// Out-edges of `v` that a non-negative search may follow
    ///
    /// Unlike [`GraphOps::neighbors`], zero-cost edges are included; only
    /// the diagonal and negative weights are skipped.
    pub fn successors(&self, v: usize) -> GraphResult<impl Iterator<Item = (usize, f64)> + '_> {
        self.check_vertex(v)?;
        Ok(self
            .cost
            .row(v)
            .iter()
            .enumerate()
            .filter(move |&(w, _)| w != v)
            .filter_map(|(w, d)| d.value().filter(|&weight| weight >= 0.0).map(|weight| (w, weight))))
    }

    /// Total cost of walking `path` edge by edge
    ///
    /// Returns `None` for an empty path or a path naming a non-vertex, and
    /// `Infinite` if two consecutive vertices are not joined by an edge.
    pub fn path_cost(&self, path: &[usize]) -> Option<Distance> {
        let (&first, _) = path.split_first()?;
        if path.iter().any(|&v| v >= self.vertex_count()) {
            return None;
        }
        if path.len() == 1 {
            return Some(self.cost[(first, first)]);
        }
        Some(path.windows(2).map(|hop| self.cost[(hop[0], hop[1])]).sum())
    }

    /// Validate a vertex index
    pub fn check_vertex(&self, v: usize) -> GraphResult<()> {
        if v < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::OutOfRange {
                vertex: v,
                vertex_count: self.vertex_count(),
            })
        }
    }

    fn set_cost(&mut self, v: usize, w: usize, value: Distance) {
        self.cost[(v, w)] = value;
        if !self.directed {
            self.cost[(w, v)] = value;
        }
    }
}

impl GraphOps for WeightedGraph {
    fn add_edge(&mut self, v: usize, w: usize, weight: f64) -> GraphResult<()> {
        self.check_vertex(v)?;
        self.check_vertex(w)?;
        if v == w {
            return Err(GraphError::SelfLoop(v));
        }
        if !weight.is_finite() {
            return Err(GraphError::InvalidWeight(weight));
        }

        // Symmetric for undirected graphs, so one cell decides for the pair
        if self.cost[(v, w)].is_infinite() {
            self.edge_count += 1;
        }
        self.set_cost(v, w, Distance::Finite(weight));

        tracing::trace!(v, w, weight, "edge added");
        Ok(())
    }

    fn remove_edge(&mut self, v: usize, w: usize) -> GraphResult<()> {
        self.check_vertex(v)?;
        self.check_vertex(w)?;
        if v == w || self.cost[(v, w)].is_infinite() {
            return Err(GraphError::EdgeNotFound(v, w));
        }

        self.set_cost(v, w, Distance::Infinite);
        self.edge_count -= 1;

        tracing::trace!(v, w, "edge removed");
        Ok(())
    }

    fn neighbors(&self, v: usize) -> GraphResult<Neighbors<'_>> {
        self.check_vertex(v)?;
        Ok(Neighbors {
            row: self.cost.row(v),
            pos: 0,
        })
    }
}

/// Lazy iterator over `(neighbor, weight)` pairs of one vertex
///
/// Only finite, strictly positive costs are yielded, which also skips the
/// zero diagonal.
#[derive(Debug, Clone)]
pub struct Neighbors<'a> {
    row: &'a [Distance],
    pos: usize,
}

impl Iterator for Neighbors<'_> {
    type Item = (usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.row.len() {
            let w = self.pos;
            self.pos += 1;
            if let Distance::Finite(weight) = self.row[w] {
                if weight > 0.0 {
                    return Some((w, weight));
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.row.len() - self.pos))
    }
}
