/// Warehouse robot demonstration
///
/// This example shows how to:
/// - Parse a character grid with terrain costs
/// - Route from 'S' to 'G' with Dijkstra
/// - Draw the route over the map

use rust_path_engine::tools::{overlay_path, Grid, GridGraph, TerrainCosts};
use rust_path_engine::{dijkstra, dijkstra_heap};

const WAREHOUSE: &str = include_str!("data/grid_example.txt");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Warehouse Robot Demo ===\n");

    let grid = Grid::parse(WAREHOUSE)?;
    let terrain = TerrainCosts::default();
    let floor = GridGraph::build(&grid, &terrain)?;

    println!("1. Warehouse map ({}x{}):", grid.rows(), grid.cols());
    for line in grid.lines() {
        println!("   {}", line);
    }
    println!("   '.' costs 1, '~' costs 3, '#' is shelving\n");

    println!("2. Routing from {:?} to {:?}...", floor.start(), floor.goal());
    let runs = dijkstra(floor.graph(), floor.start_vertex())?;
    let goal = floor.goal_vertex();

    match runs.shortest_path(goal) {
        Ok(route) => {
            let cells = floor.path_cells(&route.path);
            for line in overlay_path(&grid, &cells, &terrain) {
                println!("   {}", line);
            }
            println!("   Cost: {}, {} moves", route.cost, route.hops());
        }
        Err(e) => println!("   {}", e),
    }

    println!("\n3. Cross-checking with the binary-heap variant...");
    let heap = dijkstra_heap(floor.graph(), floor.start_vertex())?;
    println!(
        "   linear scan: {}, heap: {}",
        runs.distance(goal)?,
        heap.distance(goal)?
    );

    println!("\n=== Demo Complete ===");
    Ok(())
}
