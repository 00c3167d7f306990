/// Rust Path Engine
///
/// Shortest-path and centrality computations over small dense weighted graphs.
///
/// # Architecture
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │           Rust Path Engine                       │
/// ├──────────────────────────────────────────────────┤
/// │  ┌────────────────────────────────┐              │
/// │  │   Loaders (edge list, grid)    │              │
/// │  └────────────┬───────────────────┘              │
/// │               ↓                                   │
/// │  ┌────────────────────────────────┐              │
/// │  │   WeightedGraph (cost matrix)  │              │
/// │  └──────┬──────────────────┬──────┘              │
/// │         ↓                  ↓                      │
/// │  ┌──────────────┐   ┌──────────────┐             │
/// │  │ Floyd-Warshall│   │  Dijkstra    │             │
/// │  └──────┬───────┘   └──────┬───────┘             │
/// │         ↓                  ↓                      │
/// │  ┌──────────────┐   ┌──────────────┐             │
/// │  │  Centrality  │   │ Path rebuild │             │
/// │  └──────────────┘   └──────────────┘             │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// # Modules
///
/// - `types`: Core value types (Distance, SquareMatrix, IndexBase)
/// - `graph`: The weighted graph and its error type
/// - `algorithms`: Floyd-Warshall, Dijkstra and center selection
/// - `tools`: Edge-list and grid loaders, text/JSON/CSV rendering
/// - `config`: Environment configuration and logging setup

pub mod types;
pub mod graph;
pub mod algorithms;
pub mod tools;
pub mod config;

// Re-export commonly used types
pub use types::{Distance, DistanceMatrix, IndexBase, RoutingMatrix, SquareMatrix};

// Re-export graph types
pub use graph::{GraphError, GraphOps, GraphResult, WeightedGraph};

// Re-export algorithm types
pub use algorithms::{
    dijkstra, dijkstra_heap, dijkstra_to, find_center, floyd_warshall, rank_vertices,
    require_center, shortest_path, vertex_scores, AlgorithmError, AlgorithmResult,
    AllPairsShortestPaths, CentralityResult, ShortestPathResult, SingleSourceShortestPaths,
    VertexScore, VertexSets,
};

// Re-export tool types
pub use tools::{
    import_graph, read_grid, EdgeList, ExportFormat, Grid, GridGraph, ImportOptions,
    TerrainCosts, ToolError, ToolResult,
};

pub use config::{init_logging, Config};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
