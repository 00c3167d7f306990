/// Result rendering
///
/// Supports three output styles:
/// - Text: aligned matrix tables, `a -> b` paths and grid overlays
/// - JSON reports (`CentralityReport`, `RouteReport`, `GridRouteReport`)
/// - CSV distance matrices
///
/// Vertex ids are converted to the caller's `IndexBase` here and nowhere else.

use super::grid::{Cell, Grid, TerrainCosts};
use super::{malformed, ToolError, ToolResult};
use crate::algorithms::{CentralityResult, ShortestPathResult, VertexScore};
use crate::types::{Distance, DistanceMatrix, IndexBase, RoutingMatrix};
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Marker written over path cells in a grid overlay
pub const PATH_MARKER: char = '@';

const CELL_WIDTH: usize = 5;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(malformed(format!(
                "unknown format '{}', expected text, json or csv",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Text => "text",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// Render a distance matrix as an aligned table with external ids
///
/// ```text
///         1     2     3
/// -------------------
/// 1  |    0     1     2
/// 2  |    1     0     1
/// 3  |    2     1     0
/// ```
pub fn format_distance_matrix(matrix: &DistanceMatrix, base: IndexBase) -> String {
    format_table(matrix.size(), base, |i, j| matrix[(i, j)].to_string())
}

/// Render a routing matrix; `-` marks pairs with no next hop
pub fn format_routing_matrix(matrix: &RoutingMatrix, base: IndexBase) -> String {
    format_table(matrix.size(), base, |i, j| match matrix[(i, j)] {
        Some(next) => base.to_external(next).to_string(),
        None => "-".to_string(),
    })
}

fn format_table(n: usize, base: IndexBase, cell: impl Fn(usize, usize) -> String) -> String {
    let mut out = String::new();

    out.push_str("    ");
    let header: Vec<String> = (0..n)
        .map(|j| format!("{:>width$}", base.to_external(j), width = CELL_WIDTH))
        .collect();
    out.push_str(&header.join(" "));
    out.push('\n');
    out.push_str(&"-".repeat(4 + CELL_WIDTH * n));
    out.push('\n');

    for i in 0..n {
        let row: Vec<String> = (0..n)
            .map(|j| format!("{:>width$}", cell(i, j), width = CELL_WIDTH))
            .collect();
        out.push_str(&format!("{:<3}|{}\n", base.to_external(i), row.join(" ")));
    }

    out
}

/// Render a vertex path as `a -> b -> c` with external ids
pub fn format_path(path: &[usize], base: IndexBase) -> String {
    path.iter()
        .map(|&v| base.to_external(v).to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Copy of the grid with path cells replaced by [`PATH_MARKER`]
///
/// The start and goal markers are left in place.
pub fn overlay_path(grid: &Grid, path: &[Cell], terrain: &TerrainCosts) -> Vec<String> {
    let mut rows: Vec<Vec<char>> = grid.lines().iter().map(|l| l.chars().collect()).collect();

    for &(r, c) in path {
        if let Some(ch) = rows.get_mut(r).and_then(|row| row.get_mut(c)) {
            if *ch != terrain.start && *ch != terrain.goal {
                *ch = PATH_MARKER;
            }
        }
    }

    rows.into_iter().map(|r| r.into_iter().collect()).collect()
}

/// Serialize any report as JSON
pub fn write_json<W: Write, T: Serialize>(writer: W, value: &T, pretty: bool) -> ToolResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, value)?;
    } else {
        serde_json::to_writer(writer, value)?;
    }
    Ok(())
}

/// Write a distance matrix as CSV, `inf` for unreachable pairs
///
/// The first column and the header row carry external vertex ids.
pub fn write_distance_csv<W: Write>(
    writer: W,
    matrix: &DistanceMatrix,
    base: IndexBase,
) -> ToolResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["vertex".to_string()];
    header.extend((0..matrix.size()).map(|j| base.to_external(j).to_string()));
    csv_writer.write_record(&header)?;

    for (i, row) in matrix.rows().enumerate() {
        let mut record = vec![base.to_external(i).to_string()];
        record.extend(row.iter().map(Distance::to_string));
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// One vertex in a centrality ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedVertex {
    pub vertex: usize,
    pub total: Distance,
    pub max: Distance,
}

/// JSON view of a center selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityReport {
    pub index_base: IndexBase,
    pub vertex_count: usize,
    pub center: usize,
    pub distances: Vec<Distance>,
    pub farthest: usize,
    pub farthest_distance: Distance,
    pub ranking: Vec<RankedVertex>,
    pub distance_matrix: Vec<Vec<Option<f64>>>,
}

impl CentralityReport {
    pub fn new(
        result: &CentralityResult,
        ranking: &[VertexScore],
        matrix: &DistanceMatrix,
        base: IndexBase,
    ) -> Self {
        Self {
            index_base: base,
            vertex_count: matrix.size(),
            center: base.to_external(result.center),
            distances: result.distances.clone(),
            farthest: base.to_external(result.farthest),
            farthest_distance: result.farthest_distance,
            ranking: ranking
                .iter()
                .map(|s| RankedVertex {
                    vertex: base.to_external(s.vertex),
                    total: s.total,
                    max: s.max,
                })
                .collect(),
            distance_matrix: matrix.to_nested(),
        }
    }
}

/// JSON view of a single origin/destination query
///
/// `cost` is `null` and `path` empty when the destination is unreachable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    pub algorithm: String,
    pub origin: usize,
    pub destination: usize,
    pub cost: Option<f64>,
    pub hops: usize,
    pub path: Vec<usize>,
}

impl RouteReport {
    pub fn new(
        algorithm: impl Into<String>,
        origin: usize,
        destination: usize,
        result: Option<&ShortestPathResult>,
        base: IndexBase,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            origin: base.to_external(origin),
            destination: base.to_external(destination),
            cost: result.map(|r| r.cost),
            hops: result.map(ShortestPathResult::hops).unwrap_or(0),
            path: result
                .map(|r| r.path.iter().map(|&v| base.to_external(v)).collect())
                .unwrap_or_default(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.cost.is_some()
    }
}

/// JSON view of a grid route, coordinates as `[row, col]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRouteReport {
    pub rows: usize,
    pub cols: usize,
    pub start: Cell,
    pub goal: Cell,
    pub cost: Option<f64>,
    pub path: Vec<Cell>,
    pub map: Vec<String>,
}

impl GridRouteReport {
    pub fn new(
        grid: &Grid,
        start: Cell,
        goal: Cell,
        cost: Option<f64>,
        path: Vec<Cell>,
        terrain: &TerrainCosts,
    ) -> Self {
        let map = if cost.is_some() {
            overlay_path(grid, &path, terrain)
        } else {
            grid.lines()
        };
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            start,
            goal,
            cost,
            path,
            map,
        }
    }
}
