/// Single-source shortest paths
///
/// Implements Dijkstra's algorithm over a `WeightedGraph`. The reference
/// variant selects the next vertex with a linear scan over the open set;
/// `dijkstra_heap` uses a binary heap and yields the same distances.
///
/// Edge weights must be non-negative. This precondition is not checked.

use super::{check_index, AlgorithmError, AlgorithmResult, ShortestPathResult};
use crate::graph::WeightedGraph;
use crate::types::Distance;
use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

/// Open/closed partition of the vertex set during a Dijkstra run
///
/// Every vertex starts open and moves to closed at most once; the two sets
/// are disjoint and together always cover all vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexSets {
    open: BTreeSet<usize>,
    closed: BTreeSet<usize>,
}

impl VertexSets {
    /// All `vertex_count` vertices open, none closed
    pub fn new(vertex_count: usize) -> Self {
        Self {
            open: (0..vertex_count).collect(),
            closed: BTreeSet::new(),
        }
    }

    pub fn is_open(&self, v: usize) -> bool {
        self.open.contains(&v)
    }

    pub fn is_closed(&self, v: usize) -> bool {
        self.closed.contains(&v)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub fn closed_count(&self) -> usize {
        self.closed.len()
    }

    /// Move `v` from open to closed; returns false if it was not open
    pub fn close(&mut self, v: usize) -> bool {
        if self.open.remove(&v) {
            self.closed.insert(v);
            true
        } else {
            false
        }
    }

    /// Open vertex with the smallest finite distance, lowest index on ties
    ///
    /// Returns `None` when every open vertex is still at infinity.
    fn nearest_open(&self, dist: &[Distance]) -> Option<usize> {
        let mut best: Option<(usize, Distance)> = None;
        for &v in &self.open {
            let d = dist[v];
            if d.is_infinite() {
                continue;
            }
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((v, d)),
            }
        }
        best.map(|(v, _)| v)
    }
}

/// Distances and predecessors from one source vertex
#[derive(Debug, Clone, PartialEq)]
pub struct SingleSourceShortestPaths {
    source: usize,
    dist: Vec<Distance>,
    predecessor: Vec<Option<usize>>,
    sets: VertexSets,
}

impl SingleSourceShortestPaths {
    fn start(vertex_count: usize, source: usize) -> Self {
        let mut dist = vec![Distance::Infinite; vertex_count];
        dist[source] = Distance::ZERO;

        Self {
            source,
            dist,
            predecessor: vec![None; vertex_count],
            sets: VertexSets::new(vertex_count),
        }
    }

    pub fn source(&self) -> usize {
        self.source
    }

    /// Distance vector indexed by vertex
    pub fn distances(&self) -> &[Distance] {
        &self.dist
    }

    /// Predecessor vector indexed by vertex (`None` for the source and unreached vertices)
    pub fn predecessors(&self) -> &[Option<usize>] {
        &self.predecessor
    }

    /// Final open/closed partition
    pub fn vertex_sets(&self) -> &VertexSets {
        &self.sets
    }

    /// Total cost from the source to `destination`
    pub fn distance(&self, destination: usize) -> AlgorithmResult<Distance> {
        check_index(destination, self.dist.len())?;
        Ok(self.dist[destination])
    }

    pub fn predecessor(&self, v: usize) -> AlgorithmResult<Option<usize>> {
        check_index(v, self.predecessor.len())?;
        Ok(self.predecessor[v])
    }

    /// Walk predecessors back from `destination` to the source
    ///
    /// Returns an empty path when `destination` is unreachable.
    pub fn reconstruct_path(&self, destination: usize) -> AlgorithmResult<Vec<usize>> {
        check_index(destination, self.dist.len())?;
        if self.dist[destination].is_infinite() {
            return Ok(Vec::new());
        }

        let mut path = vec![destination];
        let mut current = destination;
        while current != self.source {
            match self.predecessor[current] {
                Some(prev) if path.len() <= self.dist.len() => {
                    path.push(prev);
                    current = prev;
                }
                _ => {
                    tracing::warn!(
                        source = self.source,
                        destination,
                        "predecessor chain does not lead back to the source"
                    );
                    return Ok(Vec::new());
                }
            }
        }

        path.reverse();
        Ok(path)
    }

    /// Path and cost, failing with `UnreachableTarget` when there is no path
    pub fn shortest_path(&self, destination: usize) -> AlgorithmResult<ShortestPathResult> {
        let cost = self.distance(destination)?.value().ok_or(
            AlgorithmError::UnreachableTarget {
                origin: self.source,
                target: destination,
            },
        )?;
        let path = self.reconstruct_path(destination)?;

        Ok(ShortestPathResult { path, cost })
    }

    /// Relax every still-open out-neighbor of `r`
    fn relax_from(&mut self, graph: &WeightedGraph, r: usize) -> AlgorithmResult<usize> {
        let mut updated = 0;
        for (l, weight) in graph.successors(r)? {
            if !self.sets.is_open(l) {
                continue;
            }
            let candidate = self.dist[r] + weight;
            if candidate < self.dist[l] {
                tracing::trace!(from = r, to = l, cost = %candidate, "relaxed");
                self.dist[l] = candidate;
                self.predecessor[l] = Some(r);
                updated += 1;
            }
        }
        Ok(updated)
    }
}

/// Dijkstra from `source` until every reachable vertex is closed
pub fn dijkstra(graph: &WeightedGraph, source: usize) -> AlgorithmResult<SingleSourceShortestPaths> {
    run(graph, source, None)
}

/// Dijkstra from `source`, stopping as soon as `target` is closed
///
/// The target's distance and predecessor chain are the same as with a full
/// run; other vertices may be left open.
pub fn dijkstra_to(
    graph: &WeightedGraph,
    source: usize,
    target: usize,
) -> AlgorithmResult<SingleSourceShortestPaths> {
    graph.check_vertex(target)?;
    run(graph, source, Some(target))
}

fn run(
    graph: &WeightedGraph,
    source: usize,
    stop_at: Option<usize>,
) -> AlgorithmResult<SingleSourceShortestPaths> {
    graph.check_vertex(source)?;

    let mut state = SingleSourceShortestPaths::start(graph.vertex_count(), source);
    let mut relaxations = 0;

    while let Some(r) = state.sets.nearest_open(&state.dist) {
        state.sets.close(r);
        if stop_at == Some(r) {
            break;
        }
        relaxations += state.relax_from(graph, r)?;
    }

    tracing::debug!(
        source,
        target = ?stop_at,
        closed = state.sets.closed_count(),
        relaxations,
        "dijkstra finished"
    );

    Ok(state)
}

/// Find the shortest path between two vertices
///
/// # Arguments
/// * `graph` - Graph with non-negative weights
/// * `source` - Start vertex
/// * `target` - End vertex
///
/// # Returns
/// * `Ok(ShortestPathResult)` - Shortest path found
/// * `Err(AlgorithmError::UnreachableTarget)` - No path exists
pub fn shortest_path(
    graph: &WeightedGraph,
    source: usize,
    target: usize,
) -> AlgorithmResult<ShortestPathResult> {
    dijkstra_to(graph, source, target)?.shortest_path(target)
}

/// Node in priority queue for Dijkstra's algorithm
#[derive(Debug, Clone, Copy)]
struct DijkstraNode {
    vertex: usize,
    cost: Distance,
}

impl Ord for DijkstraNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap, lowest vertex first on equal cost
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for DijkstraNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DijkstraNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DijkstraNode {}

/// Dijkstra with a binary heap instead of the open-set scan
///
/// O((V + E) log V). Produces the same distance vector as [`dijkstra`].
pub fn dijkstra_heap(
    graph: &WeightedGraph,
    source: usize,
) -> AlgorithmResult<SingleSourceShortestPaths> {
    graph.check_vertex(source)?;

    let mut state = SingleSourceShortestPaths::start(graph.vertex_count(), source);
    let mut heap = BinaryHeap::new();
    heap.push(DijkstraNode {
        vertex: source,
        cost: Distance::ZERO,
    });

    while let Some(DijkstraNode { vertex, cost }) = heap.pop() {
        // Skip stale entries and already closed vertices
        if !state.sets.is_open(vertex) || cost > state.dist[vertex] {
            continue;
        }
        state.sets.close(vertex);

        for (neighbor, weight) in graph.successors(vertex)? {
            if !state.sets.is_open(neighbor) {
                continue;
            }
            let new_cost = cost + weight;
            if new_cost < state.dist[neighbor] {
                state.dist[neighbor] = new_cost;
                state.predecessor[neighbor] = Some(vertex);
                heap.push(DijkstraNode {
                    vertex: neighbor,
                    cost: new_cost,
                });
            }
        }
    }

    tracing::debug!(source, closed = state.sets.closed_count(), "heap dijkstra finished");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::floyd_warshall;
    use crate::graph::GraphOps;

    // Test graph:
    //   0 -2-> 1 -1-> 3 -4-> 4
    //   |                     ^
    //   +-10-> 2 -----1-------+
    fn setup_test_graph() -> WeightedGraph {
        let mut g = WeightedGraph::directed(5).unwrap();
        g.add_edge(0, 1, 2.0).unwrap();
        g.add_edge(0, 2, 10.0).unwrap();
        g.add_edge(1, 3, 1.0).unwrap();
        g.add_edge(3, 4, 4.0).unwrap();
        g.add_edge(2, 4, 1.0).unwrap();
        g
    }

    #[test]
    fn test_shortest_path_direct() {
        let g = setup_test_graph();
        let result = shortest_path(&g, 0, 1).unwrap();

        assert_eq!(result.path, vec![0, 1]);
        assert_eq!(result.cost, 2.0);
        assert_eq!(result.hops(), 1);
    }

    #[test]
    fn test_shortest_path_multiple_hops() {
        let g = setup_test_graph();
        let result = shortest_path(&g, 0, 4).unwrap();

        assert_eq!(result.path, vec![0, 1, 3, 4]);
        assert_eq!(result.cost, 7.0);
    }

    #[test]
    fn test_shortest_path_not_found() {
        let g = setup_test_graph();
        let result = shortest_path(&g, 4, 0);

        assert!(matches!(
            result.unwrap_err(),
            AlgorithmError::UnreachableTarget { origin: 4, target: 0 }
        ));
    }

    #[test]
    fn test_full_run_vectors() {
        let g = setup_test_graph();
        let run = dijkstra(&g, 0).unwrap();

        let expected: Vec<Distance> = [0.0, 2.0, 10.0, 3.0, 7.0]
            .into_iter()
            .map(Distance::Finite)
            .collect();
        assert_eq!(run.distances(), expected.as_slice());
        assert_eq!(run.predecessors(), &[None, Some(0), Some(0), Some(1), Some(3)]);
        assert_eq!(run.vertex_sets().closed_count(), 5);
        assert_eq!(run.vertex_sets().open_count(), 0);
    }

    #[test]
    fn test_unreachable_vertices_stay_open() {
        let g = setup_test_graph();
        let run = dijkstra(&g, 3).unwrap();

        assert_eq!(run.distance(0).unwrap(), Distance::Infinite);
        assert!(run.reconstruct_path(0).unwrap().is_empty());
        assert!(run.vertex_sets().is_open(0));
        assert!(run.vertex_sets().is_closed(4));
        assert_eq!(
            run.vertex_sets().open_count() + run.vertex_sets().closed_count(),
            5
        );
    }

    #[test]
    fn test_early_exit_matches_full_run_for_target() {
        let g = setup_test_graph();
        let full = dijkstra(&g, 0).unwrap();
        let early = dijkstra_to(&g, 0, 3).unwrap();

        assert_eq!(early.distance(3).unwrap(), full.distance(3).unwrap());
        assert_eq!(early.reconstruct_path(3).unwrap(), full.reconstruct_path(3).unwrap());
        // Vertex 2 (distance 10) was never closed
        assert!(early.vertex_sets().is_open(2));
    }

    #[test]
    fn test_source_path_is_single_vertex() {
        let g = setup_test_graph();
        let run = dijkstra(&g, 2).unwrap();
        assert_eq!(run.reconstruct_path(2).unwrap(), vec![2]);
        assert_eq!(run.predecessor(2).unwrap(), None);
    }

    #[test]
    fn test_invalid_source_and_target() {
        let g = setup_test_graph();
        assert!(matches!(dijkstra(&g, 9), Err(AlgorithmError::Graph(_))));
        assert!(dijkstra_to(&g, 0, 9).is_err());
        assert!(dijkstra_heap(&g, 5).is_err());

        let run = dijkstra(&g, 0).unwrap();
        assert!(matches!(
            run.reconstruct_path(7),
            Err(AlgorithmError::OutOfRange { vertex: 7, .. })
        ));
    }

    #[test]
    fn test_tie_broken_by_lowest_index() {
        // Two equal-cost routes 0->1->3 and 0->2->3
        let mut g = WeightedGraph::directed(4).unwrap();
        g.add_edge(0, 1, 1.0).unwrap();
        g.add_edge(0, 2, 1.0).unwrap();
        g.add_edge(1, 3, 1.0).unwrap();
        g.add_edge(2, 3, 1.0).unwrap();

        let run = dijkstra(&g, 0).unwrap();
        assert_eq!(run.reconstruct_path(3).unwrap(), vec![0, 1, 3]);

        let heap = dijkstra_heap(&g, 0).unwrap();
        assert_eq!(heap.reconstruct_path(3).unwrap(), vec![0, 1, 3]);
    }

    #[test]
    fn test_heap_matches_linear_scan() {
        let g = setup_test_graph();
        for source in g.vertices() {
            let linear = dijkstra(&g, source).unwrap();
            let heap = dijkstra_heap(&g, source).unwrap();
            assert_eq!(linear.distances(), heap.distances());
        }
    }

    #[test]
    fn test_zero_weight_edge_is_followed() {
        // 0 -0-> 1 -1-> 2
        let mut g = WeightedGraph::new(3, true).unwrap();
        g.add_edge(0, 1, 0.0).unwrap();
        g.add_edge(1, 2, 1.0).unwrap();

        let apsp = floyd_warshall(&g);
        let linear = dijkstra(&g, 0).unwrap();
        let heap = dijkstra_heap(&g, 0).unwrap();

        let expected = apsp.distance(0, 2).unwrap();
        assert_eq!(expected, Distance::Finite(1.0));
        assert_eq!(linear.distance(2).unwrap(), expected);
        assert_eq!(heap.distance(2).unwrap(), expected);
        assert_eq!(linear.reconstruct_path(2).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_vertex_sets_move_once() {
        let mut sets = VertexSets::new(3);
        assert!(sets.close(1));
        assert!(!sets.close(1));
        assert!(sets.is_closed(1));
        assert!(!sets.is_open(1));
        assert_eq!(sets.open_count(), 2);
    }
}
