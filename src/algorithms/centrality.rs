/// Center selection over an all-pairs distance matrix
///
/// The center is the vertex with the smallest total distance to every
/// vertex; ties go to the smaller maximum distance, then to the lowest index.

use super::{AlgorithmError, AlgorithmResult};
use crate::types::{Distance, DistanceMatrix};
use serde::Serialize;
use std::cmp::Ordering;

/// Aggregate distance figures for one vertex (one matrix row)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexScore {
    pub vertex: usize,
    /// Sum of the row; infinite if any vertex is unreachable
    pub total: Distance,
    /// Largest entry of the row (the vertex's eccentricity)
    pub max: Distance,
}

impl VertexScore {
    fn from_row(vertex: usize, row: &[Distance]) -> Self {
        let total = row.iter().copied().sum();
        let max = row
            .iter()
            .copied()
            .fold(Distance::ZERO, |acc, d| if d > acc { d } else { acc });
        Self { vertex, total, max }
    }

    /// Centrality order: total, then max (index order is kept by stable sorting)
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.total
            .total_cmp(&other.total)
            .then_with(|| self.max.total_cmp(&other.max))
    }
}

/// The chosen center and how far it is from everything else
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityResult {
    pub center: usize,
    /// The center's row of the distance matrix
    pub distances: Vec<Distance>,
    /// First vertex at maximum distance from the center
    pub farthest: usize,
    pub farthest_distance: Distance,
}

/// Score every vertex, in index order
pub fn vertex_scores(dist: &DistanceMatrix) -> Vec<VertexScore> {
    dist.rows()
        .enumerate()
        .map(|(v, row)| VertexScore::from_row(v, row))
        .collect()
}

/// Every vertex ordered from most to least central
pub fn rank_vertices(dist: &DistanceMatrix) -> Vec<VertexScore> {
    let mut scores = vertex_scores(dist);
    scores.sort_by(VertexScore::rank_cmp);
    scores
}

/// Select the center of the graph
///
/// Returns `None` when no vertex has a finite total distance, i.e. no
/// vertex reaches every other vertex.
pub fn find_center(dist: &DistanceMatrix) -> Option<CentralityResult> {
    let mut best: Option<VertexScore> = None;

    for score in vertex_scores(dist) {
        if score.total.is_infinite() {
            continue;
        }
        let better = match &best {
            None => true,
            Some(current) => score.rank_cmp(current) == Ordering::Less,
        };
        if better {
            best = Some(score);
        }
    }

    let center = best?.vertex;
    let distances = dist.row(center).to_vec();

    // The center row is non-empty; first occurrence of the maximum wins
    let mut farthest = 0;
    let mut farthest_distance = distances[0];
    for (v, &d) in distances.iter().enumerate().skip(1) {
        if d > farthest_distance {
            farthest = v;
            farthest_distance = d;
        }
    }

    tracing::debug!(center, farthest, %farthest_distance, "center selected");

    Some(CentralityResult {
        center,
        distances,
        farthest,
        farthest_distance,
    })
}

/// Like [`find_center`], failing with `NoCenter` instead of returning `None`
pub fn require_center(dist: &DistanceMatrix) -> AlgorithmResult<CentralityResult> {
    find_center(dist).ok_or(AlgorithmError::NoCenter)
}
