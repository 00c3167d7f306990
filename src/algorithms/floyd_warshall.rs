/// All-pairs shortest paths
///
/// Implements Floyd-Warshall with a next-hop routing matrix so that any
/// ordered pair's path can be rebuilt without re-running the solver.

use super::{check_index, AlgorithmError, AlgorithmResult, ShortestPathResult};
use crate::graph::WeightedGraph;
use crate::types::{Distance, DistanceMatrix, RoutingMatrix};

/// Converged distance and routing matrices for one graph snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct AllPairsShortestPaths {
    dist: DistanceMatrix,
    route: RoutingMatrix,
}

/// Run Floyd-Warshall over a copy of the graph's cost matrix
///
/// The graph is not modified. Complexity is O(n³) time and O(n²) memory.
///
/// Negative-weight cycles are not detected during relaxation; check
/// [`AllPairsShortestPaths::negative_cycle_witness`] afterwards if the input
/// may contain negative weights.
pub fn floyd_warshall(graph: &WeightedGraph) -> AllPairsShortestPaths {
    let mut solver = AllPairsShortestPaths::from_costs(graph.cost_matrix().clone());
    let improvements = solver.relax();

    tracing::debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        improvements,
        "floyd-warshall finished"
    );

    solver
}

impl AllPairsShortestPaths {
    /// Seed the solver from a cost matrix without relaxing it
    ///
    /// `route[(i, j)] = j` wherever the cost is finite (including `i == j`).
    pub fn from_costs(cost: DistanceMatrix) -> Self {
        let n = cost.size();
        let mut route = RoutingMatrix::filled(n, None);
        for i in 0..n {
            for j in 0..n {
                if cost[(i, j)].is_finite() {
                    route[(i, j)] = Some(j);
                }
            }
        }

        Self { dist: cost, route }
    }

    /// One full relaxation pass, `k` outermost
    ///
    /// Returns the number of cells that improved. On a converged matrix
    /// this is zero and nothing changes.
    pub fn relax(&mut self) -> usize {
        let n = self.dist.size();
        let mut improvements = 0;

        for k in 0..n {
            for i in 0..n {
                let d_ik = self.dist[(i, k)];
                if d_ik.is_infinite() {
                    continue;
                }
                for j in 0..n {
                    let d_kj = self.dist[(k, j)];
                    if d_kj.is_infinite() {
                        continue;
                    }
                    let via_k = d_ik + d_kj;
                    if via_k < self.dist[(i, j)] {
                        self.dist[(i, j)] = via_k;
                        self.route[(i, j)] = self.route[(i, k)];
                        improvements += 1;
                    }
                }
            }
        }

        improvements
    }

    pub fn vertex_count(&self) -> usize {
        self.dist.size()
    }

    /// The completed distance matrix
    pub fn distances(&self) -> &DistanceMatrix {
        &self.dist
    }

    /// The completed routing (next-hop) matrix
    pub fn routing(&self) -> &RoutingMatrix {
        &self.route
    }

    pub fn into_distances(self) -> DistanceMatrix {
        self.dist
    }

    /// Shortest distance from `origin` to `destination`
    pub fn distance(&self, origin: usize, destination: usize) -> AlgorithmResult<Distance> {
        self.check_pair(origin, destination)?;
        Ok(self.dist[(origin, destination)])
    }

    /// Vertex visited right after `origin` on the way to `destination`
    pub fn next_hop(&self, origin: usize, destination: usize) -> AlgorithmResult<Option<usize>> {
        self.check_pair(origin, destination)?;
        Ok(self.route[(origin, destination)])
    }

    /// Rebuild the vertex sequence from `origin` to `destination`
    ///
    /// # Returns
    /// * `Ok(Some(path))` - origin first, destination last (`[origin]` when equal)
    /// * `Ok(None)` - destination is unreachable
    /// * `Err(OutOfRange)` - either vertex is not in the graph
    pub fn reconstruct_path(
        &self,
        origin: usize,
        destination: usize,
    ) -> AlgorithmResult<Option<Vec<usize>>> {
        self.check_pair(origin, destination)?;
        if self.dist[(origin, destination)].is_infinite() {
            return Ok(None);
        }

        let n = self.vertex_count();
        let mut path = vec![origin];
        let mut current = origin;

        while current != destination {
            match self.route[(current, destination)] {
                Some(next) => {
                    current = next;
                    path.push(current);
                }
                None => {
                    tracing::warn!(origin, destination, current, "routing matrix has no next hop");
                    return Ok(None);
                }
            }

            // A converged matrix never needs more than n - 1 hops
            if path.len() > n {
                tracing::warn!(origin, destination, "routing walk exceeded vertex count");
                return Ok(None);
            }
        }

        Ok(Some(path))
    }

    /// Path and cost, failing with `UnreachableTarget` when there is no path
    pub fn shortest_path(
        &self,
        origin: usize,
        destination: usize,
    ) -> AlgorithmResult<ShortestPathResult> {
        let unreachable = AlgorithmError::UnreachableTarget {
            origin,
            target: destination,
        };
        let path = self
            .reconstruct_path(origin, destination)?
            .ok_or_else(|| unreachable.clone())?;
        let cost = self.dist[(origin, destination)]
            .value()
            .ok_or(unreachable)?;

        Ok(ShortestPathResult { path, cost })
    }

    /// First vertex whose distance to itself went negative
    ///
    /// Such a vertex lies on a negative cycle and every distance through it
    /// is meaningless.
    pub fn negative_cycle_witness(&self) -> Option<usize> {
        (0..self.vertex_count()).find(|&v| self.dist[(v, v)] < Distance::ZERO)
    }

    fn check_pair(&self, origin: usize, destination: usize) -> AlgorithmResult<()> {
        check_index(origin, self.vertex_count())?;
        check_index(destination, self.vertex_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphOps;

    fn triangle() -> WeightedGraph {
        let mut g = WeightedGraph::undirected(3).unwrap();
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 2, 1.0).unwrap();
        g.add_edge(0, 2, 5.0).unwrap();
        g
    }

    #[test]
    fn test_triangle_goes_through_middle() {
        let apsp = floyd_warshall(&triangle());

        assert_eq!(apsp.distance(0, 2).unwrap(), Distance::Finite(2.0));
        assert_eq!(apsp.reconstruct_path(0, 2).unwrap(), Some(vec![0, 1, 2]));
        assert_eq!(apsp.reconstruct_path(2, 0).unwrap(), Some(vec![2, 1, 0]));
        assert_eq!(apsp.next_hop(0, 2).unwrap(), Some(1));
    }

    #[test]
    fn test_graph_is_not_mutated() {
        let g = triangle();
        let _ = floyd_warshall(&g);
        assert_eq!(g.cost(0, 2).unwrap(), Distance::Finite(5.0));
    }

    #[test]
    fn test_path_to_self() {
        let apsp = floyd_warshall(&triangle());
        assert_eq!(apsp.reconstruct_path(1, 1).unwrap(), Some(vec![1]));
        assert_eq!(apsp.distance(1, 1).unwrap(), Distance::ZERO);
    }

    #[test]
    fn test_unreachable_pair() {
        let mut g = WeightedGraph::directed(3).unwrap();
        g.add_edge(0, 1, 2.0).unwrap();
        let apsp = floyd_warshall(&g);

        assert_eq!(apsp.distance(1, 0).unwrap(), Distance::Infinite);
        assert_eq!(apsp.reconstruct_path(1, 0).unwrap(), None);
        assert_eq!(apsp.reconstruct_path(0, 2).unwrap(), None);
        assert_eq!(
            apsp.shortest_path(0, 2),
            Err(AlgorithmError::UnreachableTarget {
                origin: 0,
                target: 2
            })
        );
    }

    #[test]
    fn test_out_of_range_pair() {
        let apsp = floyd_warshall(&triangle());
        assert!(matches!(
            apsp.reconstruct_path(0, 3),
            Err(AlgorithmError::OutOfRange { vertex: 3, .. })
        ));
    }

    #[test]
    fn test_relax_is_idempotent() {
        let mut apsp = floyd_warshall(&triangle());
        let before = apsp.clone();

        assert_eq!(apsp.relax(), 0);
        assert_eq!(apsp, before);
    }

    #[test]
    fn test_directed_negative_edge_without_cycle() {
        let mut g = WeightedGraph::directed(3).unwrap();
        g.add_edge(0, 1, 4.0).unwrap();
        g.add_edge(1, 2, -2.0).unwrap();
        g.add_edge(0, 2, 3.0).unwrap();
        let apsp = floyd_warshall(&g);

        let result = apsp.shortest_path(0, 2).unwrap();
        assert_eq!(result.cost, 2.0);
        assert_eq!(result.path, vec![0, 1, 2]);
        assert_eq!(apsp.negative_cycle_witness(), None);
    }

    #[test]
    fn test_negative_cycle_witness() {
        let mut g = WeightedGraph::directed(2).unwrap();
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(1, 0, -3.0).unwrap();
        let apsp = floyd_warshall(&g);

        assert_eq!(apsp.negative_cycle_witness(), Some(0));
    }

    #[test]
    fn test_routing_seeded_from_direct_edges() {
        let apsp = AllPairsShortestPaths::from_costs(triangle().cost_matrix().clone());

        assert_eq!(apsp.routing()[(0, 2)], Some(2));
        assert_eq!(apsp.routing()[(1, 1)], Some(1));
        assert_eq!(apsp.distance(0, 2).unwrap(), Distance::Finite(5.0));
    }
}
