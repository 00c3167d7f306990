use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write as IoWrite};
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use rust_path_engine::tools::EdgeRecord;
use rust_path_engine::IndexBase;

#[derive(Debug, Clone, ValueEnum)]
enum GraphType {
    Uniform,
    Ring,
    Grid,
    Tree,
    Warehouse,
}

#[derive(Parser, Debug)]
#[command(name = "data_generator")]
#[command(about = "Generate weighted graphs and warehouse maps for the path engine", long_about = None)]
struct Args {
    /// Type of graph to generate
    #[arg(short, long, value_enum)]
    graph_type: GraphType,

    /// Number of vertices
    #[arg(short = 'n', long, default_value_t = 100)]
    vertices: usize,

    /// Average degree for uniform graphs
    #[arg(short = 'd', long, default_value_t = 4)]
    avg_degree: usize,

    /// Grid size (for grid graphs and warehouse maps, creates size×size grid)
    #[arg(short = 's', long)]
    size: Option<usize>,

    /// Tree depth (for tree graphs)
    #[arg(long, default_value_t = 4)]
    depth: usize,

    /// Tree branching factor
    #[arg(short = 'b', long, default_value_t = 3)]
    branching: usize,

    /// Largest integer edge weight
    #[arg(short = 'w', long, default_value_t = 20)]
    max_weight: u32,

    /// Share of warehouse cells that are shelving (impassable)
    #[arg(long, default_value_t = 0.2)]
    obstacles: f64,

    /// Share of warehouse cells that are slow floor
    #[arg(long, default_value_t = 0.15)]
    slow: f64,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Export formats for graphs (txt, csv)
    #[arg(short, long, value_delimiter = ',', default_value = "txt")]
    formats: Vec<String>,

    /// Vertex numbering used in the written files
    #[arg(long, default_value = "1")]
    base: IndexBase,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Edge list with internal (0-based) ids
struct GraphData {
    vertex_count: usize,
    edges: Vec<EdgeRecord>,
}

struct GraphGenerator {
    rng: StdRng,
    max_weight: u32,
}

impl GraphGenerator {
    fn new(seed: u64, max_weight: u32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_weight: max_weight.max(1),
        }
    }

    fn weight(&mut self) -> f64 {
        self.rng.gen_range(1..=self.max_weight) as f64
    }

    fn edge(&mut self, source: usize, target: usize) -> EdgeRecord {
        EdgeRecord {
            source,
            target,
            weight: self.weight(),
        }
    }

    /// Generate uniform random graph (Erdős-Rényi-like with fixed average degree)
    fn generate_uniform(&mut self, n: usize, avg_degree: usize) -> GraphData {
        println!("Generating uniform random graph with {} vertices, avg degree {}...", n, avg_degree);

        let num_edges = (n * avg_degree) / 2;
        let mut edges = Vec::with_capacity(num_edges);
        let mut edge_set = HashSet::new();

        let mut attempts = 0;
        let max_attempts = num_edges * 10;

        while edges.len() < num_edges && attempts < max_attempts {
            let start = self.rng.gen_range(0..n);
            let end = self.rng.gen_range(0..n);

            if start != end && !edge_set.contains(&(start, end)) && !edge_set.contains(&(end, start)) {
                let edge = self.edge(start, end);
                edges.push(edge);
                edge_set.insert((start, end));
            }
            attempts += 1;
        }

        println!("Generated {} vertices and {} edges", n, edges.len());
        GraphData { vertex_count: n, edges }
    }

    /// Generate a ring with random weights (always connected)
    fn generate_ring(&mut self, n: usize) -> GraphData {
        println!("Generating ring with {} vertices...", n);

        let mut edges = Vec::with_capacity(n);
        if n > 1 {
            for v in 0..n {
                let w = (v + 1) % n;
                if n == 2 && v == 1 {
                    break;
                }
                let edge = self.edge(v, w);
                edges.push(edge);
            }
        }

        println!("Generated {} vertices and {} edges", n, edges.len());
        GraphData { vertex_count: n, edges }
    }

    /// Generate grid graph (rows×cols 2D lattice)
    fn generate_grid(&mut self, rows: usize, cols: usize) -> GraphData {
        println!("Generating {}×{} grid graph...", rows, cols);

        let mut edges = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                let id = row * cols + col;

                // Right neighbor
                if col + 1 < cols {
                    let edge = self.edge(id, id + 1);
                    edges.push(edge);
                }

                // Bottom neighbor
                if row + 1 < rows {
                    let edge = self.edge(id, id + cols);
                    edges.push(edge);
                }
            }
        }

        println!("Generated {} vertices and {} edges", rows * cols, edges.len());
        GraphData {
            vertex_count: rows * cols,
            edges,
        }
    }

    /// Generate balanced k-ary tree
    fn generate_tree(&mut self, depth: usize, branching: usize) -> GraphData {
        println!("Generating tree with depth {} and branching factor {}...", depth, branching);

        let mut edges = Vec::new();
        let mut current_id = 0;

        let mut queue = vec![(0usize, 0usize)]; // (id, current_depth)

        while let Some((id, d)) = queue.pop() {
            if d < depth {
                for _ in 0..branching {
                    current_id += 1;
                    let edge = self.edge(id, current_id);
                    edges.push(edge);
                    queue.push((current_id, d + 1));
                }
            }
        }

        println!("Generated {} vertices and {} edges", current_id + 1, edges.len());
        GraphData {
            vertex_count: current_id + 1,
            edges,
        }
    }

    /// Generate a warehouse map with 'S' in the first column and 'G' in the last
    fn generate_warehouse(&mut self, rows: usize, cols: usize, obstacles: f64, slow: f64) -> Vec<String> {
        println!("Generating {}×{} warehouse map...", rows, cols);

        let start_row = self.rng.gen_range(0..rows);
        let goal_row = self.rng.gen_range(0..rows);

        let mut map = Vec::with_capacity(rows);
        for r in 0..rows {
            let mut line = String::with_capacity(cols);
            for c in 0..cols {
                let cell = if r == start_row && c == 0 {
                    'S'
                } else if r == goal_row && c == cols - 1 {
                    'G'
                } else {
                    let roll: f64 = self.rng.gen();
                    if roll < obstacles {
                        '#'
                    } else if roll < obstacles + slow {
                        '~'
                    } else {
                        '.'
                    }
                };
                line.push(cell);
            }
            map.push(line);
        }

        map
    }

    /// Export graph to the whitespace edge-list format
    fn export_txt(&self, data: &GraphData, path: &Path, base: IndexBase) -> Result<()> {
        let file = File::create(path.join("graph.txt"))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{} {}", data.vertex_count, data.edges.len())?;
        for e in &data.edges {
            writeln!(
                writer,
                "{} {} {}",
                base.to_external(e.source),
                base.to_external(e.target),
                e.weight
            )?;
        }
        writer.flush()?;
        println!("Exported to text: {:?}", path.join("graph.txt"));
        Ok(())
    }

    /// Export graph to CSV with a source,target,weight header
    fn export_csv(&self, data: &GraphData, path: &Path, base: IndexBase) -> Result<()> {
        let mut writer = csv::Writer::from_path(path.join("edges.csv"))?;
        for e in &data.edges {
            writer.serialize(EdgeRecord {
                source: base.to_external(e.source),
                target: base.to_external(e.target),
                weight: e.weight,
            })?;
        }
        writer.flush()?;
        println!("Exported to CSV: {:?}", path.join("edges.csv"));
        Ok(())
    }

    /// Export a warehouse map with its `rows cols` header
    fn export_grid(&self, map: &[String], cols: usize, path: &Path) -> Result<()> {
        let file = File::create(path.join("grid.txt"))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{} {}", map.len(), cols)?;
        for line in map {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        println!("Exported grid: {:?}", path.join("grid.txt"));
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Create output directory
    std::fs::create_dir_all(&args.output)
        .context("Failed to create output directory")?;

    let mut generator = GraphGenerator::new(args.seed, args.max_weight);
    let size = args.size.unwrap_or(
        (args.vertices as f64).sqrt().ceil() as usize
    );

    if let GraphType::Warehouse = args.graph_type {
        if size < 2 {
            bail!("warehouse maps need at least 2 columns");
        }
        if !(0.0..=1.0).contains(&(args.obstacles + args.slow)) {
            bail!("--obstacles plus --slow must be between 0 and 1");
        }
        let map = generator.generate_warehouse(size, size, args.obstacles, args.slow);
        generator.export_grid(&map, size, &args.output)?;

        println!("\n✅ Map generation complete!");
        println!("Output directory: {:?}", args.output);
        return Ok(());
    }

    if args.vertices == 0 {
        bail!("--vertices must be at least 1");
    }

    // Generate graph based on type
    let graph_data = match args.graph_type {
        GraphType::Uniform => {
            generator.generate_uniform(args.vertices, args.avg_degree)
        }
        GraphType::Ring => {
            generator.generate_ring(args.vertices)
        }
        GraphType::Grid => {
            generator.generate_grid(size, size)
        }
        GraphType::Tree => {
            generator.generate_tree(args.depth, args.branching)
        }
        GraphType::Warehouse => unreachable!("handled above"),
    };

    // Export to requested formats
    for format in &args.formats {
        match format.as_str() {
            "txt" => generator.export_txt(&graph_data, &args.output, args.base)?,
            "csv" => generator.export_csv(&graph_data, &args.output, args.base)?,
            _ => eprintln!("Unknown format: {}", format),
        }
    }

    println!("\n✅ Data generation complete!");
    println!("Output directory: {:?}", args.output);
    println!("Graph statistics:");
    println!("  - Vertices: {}", graph_data.vertex_count);
    println!("  - Edges: {}", graph_data.edges.len());
    if graph_data.vertex_count > 0 {
        let avg_degree = (2 * graph_data.edges.len()) as f64 / graph_data.vertex_count as f64;
        println!("  - Average degree: {:.2}", avg_degree);
    }

    Ok(())
}
