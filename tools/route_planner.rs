use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rust_path_engine::algorithms::{
    dijkstra_heap, dijkstra_to, floyd_warshall, rank_vertices, require_center, AlgorithmError,
    AllPairsShortestPaths, ShortestPathResult,
};
use rust_path_engine::tools::{
    format_distance_matrix, format_path, format_routing_matrix, import_graph, overlay_path,
    read_grid, write_distance_csv, write_json, CentralityReport, ExportFormat, GridGraph,
    GridRouteReport, ImportOptions, RouteReport, TerrainCosts,
};
use rust_path_engine::{init_logging, Config, Distance, IndexBase, WeightedGraph};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "route_planner")]
#[command(about = "Shortest paths, routing tables and network centers", long_about = None)]
struct Cli {
    /// Output format (text, json, csv)
    #[arg(short, long, global = true, default_value = "text")]
    format: ExportFormat,

    /// Vertex numbering in files and output (overrides PATH_ENGINE_INDEX_BASE)
    #[arg(long, global = true)]
    base: Option<IndexBase>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// All-pairs distances and the center of the network
    AllPairs {
        /// Edge list (.txt) or CSV edge file
        input: PathBuf,

        /// Treat edges as one-way
        #[arg(long)]
        directed: bool,

        /// Also print the routing (next-hop) matrix
        #[arg(long)]
        routing: bool,

        /// Also print every vertex ordered by centrality
        #[arg(long)]
        ranking: bool,
    },

    /// Shortest path between two vertices
    Route {
        /// Edge list (.txt) or CSV edge file
        input: PathBuf,

        /// Origin vertex id
        #[arg(long)]
        from: usize,

        /// Destination vertex id
        #[arg(long)]
        to: usize,

        /// Treat edges as one-way
        #[arg(long)]
        directed: bool,

        /// Solver to use
        #[arg(short, long, value_enum, default_value_t = Solver::Dijkstra)]
        algorithm: Solver,
    },

    /// Lowest-cost route from 'S' to 'G' on a character grid
    Grid {
        /// Grid file with a 'rows cols' header
        input: PathBuf,

        /// Terrain table JSON (overrides PATH_ENGINE_TERRAIN)
        #[arg(long)]
        terrain: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Solver {
    Dijkstra,
    Heap,
    FloydWarshall,
}

impl Solver {
    fn name(self) -> &'static str {
        match self {
            Solver::Dijkstra => "dijkstra",
            Solver::Heap => "dijkstra-heap",
            Solver::FloydWarshall => "floyd-warshall",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()?;
    init_logging(&config.logging)?;

    let base = cli.base.unwrap_or(config.engine.index_base);
    tracing::debug!(%base, format = %cli.format, "route planner starting");

    match cli.command {
        Command::AllPairs {
            input,
            directed,
            routing,
            ranking,
        } => run_all_pairs(&input, directed, routing, ranking, base, cli.format),
        Command::Route {
            input,
            from,
            to,
            directed,
            algorithm,
        } => run_route(&input, from, to, directed, algorithm, base, cli.format),
        Command::Grid { input, terrain } => {
            let terrain = match terrain {
                Some(path) => TerrainCosts::from_json_file(&path)
                    .with_context(|| format!("failed to load terrain table {}", path.display()))?,
                None => config.terrain_costs()?,
            };
            run_grid(&input, &terrain, cli.format)
        }
    }
}

fn load_graph(input: &Path, directed: bool, base: IndexBase) -> Result<WeightedGraph> {
    let options = ImportOptions {
        base,
        directed,
        vertex_count: None,
    };
    import_graph(input, &options).with_context(|| format!("failed to load {}", input.display()))
}

/// Floyd-Warshall, refusing results poisoned by a negative cycle
fn solve_all_pairs(graph: &WeightedGraph, base: IndexBase) -> Result<AllPairsShortestPaths> {
    let apsp = floyd_warshall(graph);
    if let Some(v) = apsp.negative_cycle_witness() {
        return Err(AlgorithmError::NegativeCycleUnsupported(base.to_external(v)).into());
    }
    Ok(apsp)
}

fn run_all_pairs(
    input: &Path,
    directed: bool,
    show_routing: bool,
    show_ranking: bool,
    base: IndexBase,
    format: ExportFormat,
) -> Result<()> {
    let graph = load_graph(input, directed, base)?;
    let apsp = solve_all_pairs(&graph, base)?;
    let dist = apsp.distances();

    match format {
        ExportFormat::Csv => {
            write_distance_csv(io::stdout().lock(), dist, base)?;
            return Ok(());
        }
        ExportFormat::Json => {
            let center = require_center(dist)?;
            let report = CentralityReport::new(&center, &rank_vertices(dist), dist, base);
            write_json(io::stdout().lock(), &report, true)?;
            println!();
            return Ok(());
        }
        ExportFormat::Text => {}
    }

    println!("Direct cost matrix:");
    println!("{}", format_distance_matrix(graph.cost_matrix(), base));
    println!("Shortest distance matrix:");
    println!("{}", format_distance_matrix(dist, base));
    if show_routing {
        println!("Routing matrix (next hop):");
        println!("{}", format_routing_matrix(apsp.routing(), base));
    }

    let center = require_center(dist)?;
    let distances: Vec<String> = center.distances.iter().map(Distance::to_string).collect();
    println!("Center: {}", base.to_external(center.center));
    println!("  (smallest total distance to every other vertex)");
    println!("Distances from center: [{}]", distances.join(", "));
    println!(
        "Farthest vertex: {} at distance {}",
        base.to_external(center.farthest),
        center.farthest_distance
    );

    if show_ranking {
        println!("\nRanking (total, max):");
        for (i, score) in rank_vertices(dist).iter().enumerate() {
            println!(
                "{:>3}. vertex {:<4} {:>8} {:>6}",
                i + 1,
                base.to_external(score.vertex),
                score.total,
                score.max
            );
        }
    }

    Ok(())
}

fn run_route(
    input: &Path,
    from: usize,
    to: usize,
    directed: bool,
    solver: Solver,
    base: IndexBase,
    format: ExportFormat,
) -> Result<()> {
    let graph = load_graph(input, directed, base)?;
    let origin = base
        .to_internal(from)
        .ok_or_else(|| anyhow!("--from {} is below the index base {}", from, base))?;
    let destination = base
        .to_internal(to)
        .ok_or_else(|| anyhow!("--to {} is below the index base {}", to, base))?;

    if !matches!(solver, Solver::FloydWarshall) && graph.edges().any(|(_, _, w)| w < 0.0) {
        tracing::warn!("graph has negative weights; dijkstra ignores those edges");
    }

    let result = match solver {
        Solver::Dijkstra => reachable(
            dijkstra_to(&graph, origin, destination)?.shortest_path(destination),
        )?,
        Solver::Heap => reachable(dijkstra_heap(&graph, origin)?.shortest_path(destination))?,
        Solver::FloydWarshall => {
            reachable(solve_all_pairs(&graph, base)?.shortest_path(origin, destination))?
        }
    };

    let report = RouteReport::new(solver.name(), origin, destination, result.as_ref(), base);
    match format {
        ExportFormat::Json => {
            write_json(io::stdout().lock(), &report, true)?;
            println!();
        }
        _ => match &result {
            Some(found) => {
                println!("Shortest path from {} to {}: {}", from, to, format_path(&found.path, base));
                println!("Cost: {}", Distance::new(found.cost));
                println!("Hops: {}", found.hops());
            }
            None => println!("Vertex {} is unreachable from {}", to, from),
        },
    }

    Ok(())
}

/// Turn "no path" into `None`, keeping every other error
fn reachable(
    result: Result<ShortestPathResult, AlgorithmError>,
) -> Result<Option<ShortestPathResult>> {
    match result {
        Ok(found) => Ok(Some(found)),
        Err(AlgorithmError::UnreachableTarget { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn run_grid(input: &Path, terrain: &TerrainCosts, format: ExportFormat) -> Result<()> {
    let grid = read_grid(input).with_context(|| format!("failed to load {}", input.display()))?;
    let grid_graph = GridGraph::build(&grid, terrain)?;

    let goal = grid_graph.goal_vertex();
    let sssp = dijkstra_to(grid_graph.graph(), grid_graph.start_vertex(), goal)?;
    let found = reachable(sssp.shortest_path(goal))?;

    let (cost, path) = match &found {
        Some(r) => (Some(r.cost), grid_graph.path_cells(&r.path)),
        None => (None, Vec::new()),
    };

    if let ExportFormat::Json = format {
        let report = GridRouteReport::new(
            &grid,
            grid_graph.start(),
            grid_graph.goal(),
            cost,
            path,
            terrain,
        );
        write_json(io::stdout().lock(), &report, true)?;
        println!();
        return Ok(());
    }

    println!("Warehouse map ({}x{}):", grid.rows(), grid.cols());
    for line in grid.lines() {
        println!("{}", line);
    }

    match cost {
        Some(cost) => {
            println!("\nLowest-cost path:");
            for line in overlay_path(&grid, &path, terrain) {
                println!("{}", line);
            }
            let cells: Vec<String> = path.iter().map(|(r, c)| format!("({}, {})", r, c)).collect();
            println!("\nTotal cost from {} to {}: {}", terrain.start, terrain.goal, Distance::new(cost));
            println!("Path (row, col): {}", cells.join(" -> "));
        }
        None => println!(
            "\nGoal '{}' is unreachable from start '{}'",
            terrain.goal, terrain.start
        ),
    }

    Ok(())
}
