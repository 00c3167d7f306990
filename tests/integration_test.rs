/// End-to-end tests for the path engine
///
/// Covers the worked scenarios (triangle, line, grid, disconnected graph,
/// self-loop) and the solver properties on seeded random graphs, with
/// petgraph and pathfinding as independent oracles.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_path_engine::algorithms::{AlgorithmError, CentralityResult};
use rust_path_engine::tools::{parse_edge_list, Grid, GridGraph, TerrainCosts};
use rust_path_engine::{
    dijkstra, dijkstra_heap, dijkstra_to, find_center, floyd_warshall, require_center,
    shortest_path, vertex_scores, Distance, GraphError, GraphOps, IndexBase, WeightedGraph,
};

/// Random graph with integer weights so sums are exact
fn random_graph(n: usize, edges: usize, directed: bool, seed: u64) -> WeightedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = WeightedGraph::new(n, directed).unwrap();
    for _ in 0..edges {
        let v = rng.gen_range(0..n);
        let w = rng.gen_range(0..n);
        if v != w {
            graph.add_edge(v, w, rng.gen_range(1..=25) as f64).unwrap();
        }
    }
    graph
}

fn center_of(text: &str) -> CentralityResult {
    let graph = parse_edge_list(text, IndexBase::One)
        .unwrap()
        .build_graph(false)
        .unwrap();
    find_center(floyd_warshall(&graph).distances()).unwrap()
}

/// 3-vertex triangle: 1-3 is cheaper through 2
#[test]
fn test_triangle_scenario() {
    let graph = parse_edge_list("3 3\n1 2 1\n2 3 1\n1 3 5\n", IndexBase::One)
        .unwrap()
        .build_graph(false)
        .unwrap();
    let apsp = floyd_warshall(&graph);

    assert_eq!(apsp.distance(0, 2).unwrap(), Distance::Finite(2.0));
    assert_eq!(apsp.reconstruct_path(0, 2).unwrap(), Some(vec![0, 1, 2]));

    let route = shortest_path(&graph, 0, 2).unwrap();
    assert_eq!(route.path, vec![0, 1, 2]);
    assert_eq!(route.cost, 2.0);
}

/// 4-station line: stations 2 and 3 tie on sum and max, the first wins
#[test]
fn test_line_center_scenario() {
    let center = center_of("4 3\n1 2 1\n2 3 1\n3 4 1\n");

    assert_eq!(IndexBase::One.to_external(center.center), 2);
    assert_eq!(center.farthest_distance, Distance::Finite(2.0));
    assert_eq!(IndexBase::One.to_external(center.farthest), 4);
}

/// Per-vertex scores of the 4-station line, in index order
#[test]
fn test_line_vertex_scores() {
    let graph = parse_edge_list("4 3\n1 2 1\n2 3 1\n3 4 1\n", IndexBase::One)
        .unwrap()
        .build_graph(false)
        .unwrap();
    let scores = vertex_scores(floyd_warshall(&graph).distances());

    let summary: Vec<_> = scores.iter().map(|s| (s.vertex, s.total, s.max)).collect();
    assert_eq!(
        summary,
        vec![
            (0, Distance::Finite(6.0), Distance::Finite(3.0)),
            (1, Distance::Finite(4.0), Distance::Finite(2.0)),
            (2, Distance::Finite(4.0), Distance::Finite(2.0)),
            (3, Distance::Finite(6.0), Distance::Finite(3.0)),
        ]
    );
}

/// 3x3 grid with a blocked middle cell
#[test]
fn test_grid_around_obstacle_scenario() {
    let grid = Grid::parse("3 3\nS..\n.#.\n..G\n").unwrap();
    let floor = GridGraph::build(&grid, &TerrainCosts::default()).unwrap();

    let route = shortest_path(floor.graph(), floor.start_vertex(), floor.goal_vertex()).unwrap();
    assert_eq!(route.cost, 4.0);
    assert_eq!(route.hops(), 4);
    assert!(!route.path.contains(&4), "path must avoid the shelving cell");
    assert_eq!(floor.path_cells(&route.path)[0], (0, 0));
}

/// Two components: infinite across, the center comes from the better component
#[test]
fn test_disconnected_scenario() {
    let mut graph = WeightedGraph::undirected(4).unwrap();
    graph.add_edge(0, 1, 1.0).unwrap();
    graph.add_edge(2, 3, 1.0).unwrap();
    let apsp = floyd_warshall(&graph);

    assert_eq!(apsp.distance(0, 3).unwrap(), Distance::Infinite);
    assert_eq!(apsp.reconstruct_path(0, 3).unwrap(), None);
    // Every row has an infinite entry
    assert_eq!(require_center(apsp.distances()), Err(AlgorithmError::NoCenter));

    // A directed hub that reaches everyone is still a center
    let mut directed = WeightedGraph::directed(3).unwrap();
    directed.add_edge(2, 0, 1.0).unwrap();
    directed.add_edge(2, 1, 4.0).unwrap();
    let center = find_center(floyd_warshall(&directed).distances()).unwrap();
    assert_eq!(center.center, 2);
    assert_eq!(center.farthest, 1);
}

/// Self-loops are rejected and leave the diagonal at zero
#[test]
fn test_self_loop_scenario() {
    let mut graph = WeightedGraph::undirected(3).unwrap();
    assert_eq!(graph.add_edge(1, 1, 5.0), Err(GraphError::SelfLoop(1)));
    assert_eq!(graph.cost(1, 1).unwrap(), Distance::ZERO);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_metro_network_center() {
    let center = center_of(include_str!("../demos/data/graph1.txt"));

    assert_eq!(IndexBase::One.to_external(center.center), 9);
    assert_eq!(IndexBase::One.to_external(center.farthest), 1);
    assert_eq!(center.farthest_distance, Distance::Finite(39.0));
    assert_eq!(center.distances.iter().copied().sum::<Distance>(), Distance::Finite(219.0));
}

#[test]
fn test_negative_edge_directed_graph() {
    let graph = parse_edge_list(include_str!("../demos/data/graph2.txt"), IndexBase::Zero)
        .unwrap()
        .build_graph(true)
        .unwrap();
    let apsp = floyd_warshall(&graph);

    assert_eq!(apsp.negative_cycle_witness(), None);
    let route = apsp.shortest_path(0, 6).unwrap();
    assert_eq!(route.cost, 10.0);
    assert_eq!(route.path, vec![0, 2, 1, 3, 5, 6]);
    assert_eq!(graph.path_cost(&route.path), Some(Distance::Finite(10.0)));
}

#[test]
fn test_warehouse_example() {
    let grid = Grid::parse(include_str!("../demos/data/grid_example.txt")).unwrap();
    let floor = GridGraph::build(&grid, &TerrainCosts::default()).unwrap();
    assert_eq!(floor.start(), (3, 0));
    assert_eq!(floor.goal(), (3, 8));

    let sssp = dijkstra(floor.graph(), floor.start_vertex()).unwrap();
    let route = sssp.shortest_path(floor.goal_vertex()).unwrap();
    assert_eq!(route.cost, 26.0);
    assert_eq!(route.path.first(), Some(&floor.start_vertex()));
    assert_eq!(route.path.last(), Some(&floor.goal_vertex()));
    assert_eq!(floor.graph().path_cost(&route.path), Some(Distance::Finite(26.0)));
}

#[test]
fn test_cost_matrix_invariants_after_mutation() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut graph = WeightedGraph::undirected(8).unwrap();

    for _ in 0..200 {
        let v = rng.gen_range(0..8);
        let w = rng.gen_range(0..8);
        if rng.gen_bool(0.7) {
            let _ = graph.add_edge(v, w, rng.gen_range(1..10) as f64);
        } else {
            let _ = graph.remove_edge(v, w);
        }

        for a in 0..8 {
            assert_eq!(graph.cost(a, a).unwrap(), Distance::ZERO);
            for b in 0..8 {
                assert_eq!(graph.cost(a, b).unwrap(), graph.cost(b, a).unwrap());
            }
        }
    }
    assert_eq!(graph.edges().count(), graph.edge_count());
}

#[test]
fn test_triangle_inequality_and_idempotence() {
    for seed in 0..5 {
        let graph = random_graph(12, 30, seed % 2 == 0, seed);
        let apsp = floyd_warshall(&graph);
        let d = apsp.distances();
        let n = graph.vertex_count();

        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    assert!(d[(i, j)] <= d[(i, k)] + d[(k, j)], "seed {}: {} {} {}", seed, i, j, k);
                }
            }
        }

        let mut again = apsp.clone();
        assert_eq!(again.relax(), 0);
        assert_eq!(again, apsp);
    }
}

#[test]
fn test_reconstructed_paths_match_distances() {
    for seed in 10..14 {
        let graph = random_graph(10, 18, seed % 2 == 1, seed);
        let apsp = floyd_warshall(&graph);

        for s in graph.vertices() {
            let sssp = dijkstra(&graph, s).unwrap();
            for t in graph.vertices() {
                let expected = apsp.distance(s, t).unwrap();
                assert_eq!(sssp.distance(t).unwrap(), expected);

                match apsp.reconstruct_path(s, t).unwrap() {
                    Some(path) => {
                        assert_eq!(graph.path_cost(&path), Some(expected));
                        assert_eq!(graph.path_cost(&sssp.reconstruct_path(t).unwrap()), Some(expected));
                    }
                    None => {
                        assert!(expected.is_infinite());
                        assert!(sssp.reconstruct_path(t).unwrap().is_empty());
                    }
                }
            }
        }
    }
}

#[test]
fn test_dijkstra_variants_agree() {
    let graph = random_graph(40, 120, true, 99);
    for s in [0, 7, 39] {
        let linear = dijkstra(&graph, s).unwrap();
        let heap = dijkstra_heap(&graph, s).unwrap();
        assert_eq!(linear.distances(), heap.distances());

        for t in graph.vertices() {
            let early = dijkstra_to(&graph, s, t).unwrap();
            assert_eq!(early.distance(t).unwrap(), linear.distance(t).unwrap());
        }
    }
}

/// Zero-cost edges are valid non-negative weights for both solvers
#[test]
fn test_dijkstra_matches_floyd_with_zero_weights() {
    let graph = parse_edge_list("3 2\n1 2 0\n2 3 1\n", IndexBase::One)
        .unwrap()
        .build_graph(true)
        .unwrap();
    let apsp = floyd_warshall(&graph);
    assert_eq!(apsp.distance(0, 2).unwrap(), Distance::Finite(1.0));
    assert_eq!(dijkstra(&graph, 0).unwrap().distance(2).unwrap(), Distance::Finite(1.0));

    let mut rng = StdRng::seed_from_u64(7);
    let mut graph = random_graph(25, 60, true, 7);
    for _ in 0..15 {
        let v = rng.gen_range(0..25);
        let w = rng.gen_range(0..25);
        if v != w {
            graph.add_edge(v, w, 0.0).unwrap();
        }
    }
    let apsp = floyd_warshall(&graph);
    for s in graph.vertices() {
        let linear = dijkstra(&graph, s).unwrap();
        let heap = dijkstra_heap(&graph, s).unwrap();
        for t in graph.vertices() {
            let expected = apsp.distance(s, t).unwrap();
            assert_eq!(linear.distance(t).unwrap(), expected);
            assert_eq!(heap.distance(t).unwrap(), expected);
        }
    }
}

#[test]
fn test_unreachable_target() {
    let mut graph = WeightedGraph::directed(3).unwrap();
    graph.add_edge(0, 1, 2.0).unwrap();

    let sssp = dijkstra(&graph, 0).unwrap();
    assert_eq!(sssp.distance(2).unwrap(), Distance::Infinite);
    assert!(sssp.reconstruct_path(2).unwrap().is_empty());
    assert!(matches!(
        shortest_path(&graph, 0, 2),
        Err(AlgorithmError::UnreachableTarget { origin: 0, target: 2 })
    ));
}

#[test]
fn test_floyd_warshall_matches_petgraph() {
    for seed in 20..24 {
        let graph = random_graph(15, 35, false, seed);

        let mut pg = UnGraph::<(), f64>::new_undirected();
        let nodes: Vec<NodeIndex> = graph.vertices().map(|_| pg.add_node(())).collect();
        for (v, w, weight) in graph.edges() {
            pg.add_edge(nodes[v], nodes[w], weight);
        }

        let apsp = floyd_warshall(&graph);
        for s in graph.vertices() {
            let oracle = petgraph::algo::dijkstra(&pg, nodes[s], None, |e| *e.weight());
            for t in graph.vertices() {
                let expected = oracle
                    .get(&nodes[t])
                    .map(|&d| Distance::Finite(d))
                    .unwrap_or(Distance::Infinite);
                assert_eq!(apsp.distance(s, t).unwrap(), expected, "seed {}: {} -> {}", seed, s, t);
            }
        }
    }
}

#[test]
fn test_dijkstra_matches_pathfinding() {
    let graph = random_graph(30, 90, true, 5);

    for t in graph.vertices() {
        let oracle = pathfinding::prelude::dijkstra(
            &0usize,
            |&v| {
                graph
                    .neighbors(v)
                    .unwrap()
                    .map(|(w, weight)| (w, weight as u64))
                    .collect::<Vec<_>>()
            },
            |&v| v == t,
        );

        match (oracle, shortest_path(&graph, 0, t)) {
            (Some((_, cost)), Ok(route)) => {
                assert_eq!(route.cost, cost as f64);
                assert_eq!(graph.path_cost(&route.path), Some(Distance::Finite(route.cost)));
            }
            (None, Err(AlgorithmError::UnreachableTarget { .. })) => {}
            (oracle, ours) => panic!("target {}: oracle {:?}, engine {:?}", t, oracle, ours),
        }
    }
}
