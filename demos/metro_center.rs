/// Metro network demonstration
///
/// This example shows how to:
/// - Load a 1-based edge list into an undirected graph
/// - Run Floyd-Warshall and pick the central station
/// - Rebuild a route from the routing matrix

use rust_path_engine::tools::{format_distance_matrix, format_path, parse_edge_list};
use rust_path_engine::{find_center, floyd_warshall, IndexBase};

const METRO: &str = include_str!("data/graph1.txt");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Metro Center Demo ===\n");

    let base = IndexBase::One;

    println!("1. Loading metro network...");
    let network = parse_edge_list(METRO, base)?.build_graph(false)?;
    println!(
        "   {} stations, {} track segments\n",
        network.vertex_count(),
        network.edge_count()
    );

    println!("2. Computing all shortest routes...");
    let routes = floyd_warshall(&network);
    println!("{}", format_distance_matrix(routes.distances(), base));

    println!("3. Choosing the central station...");
    match find_center(routes.distances()) {
        Some(center) => {
            let distances: Vec<String> = center.distances.iter().map(|d| d.to_string()).collect();
            println!("   - Station: {}", base.to_external(center.center));
            println!("   - Distances: [{}]", distances.join(", "));
            println!(
                "   - Farthest station: {} ({})\n",
                base.to_external(center.farthest),
                center.farthest_distance
            );
        }
        None => println!("   No station reaches every other station\n"),
    }

    println!("4. Route from station 1 to station 12...");
    let route = routes.shortest_path(0, 11)?;
    println!("   {}", format_path(&route.path, base));
    println!("   Cost: {}, {} hops", route.cost, route.hops());

    println!("\n=== Demo Complete ===");
    Ok(())
}
