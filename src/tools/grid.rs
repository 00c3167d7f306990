/// Character grids with per-terrain movement costs
///
/// A grid file has a `rows cols` header followed by `rows` lines of exactly
/// `cols` characters. Exactly one start and one goal cell are required.
/// Movement is 4-directional; the weight of a move is the cost of entering
/// the destination cell, and impassable cells get no edges at all.

use super::{malformed, ToolResult};
use crate::graph::{GraphOps, WeightedGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Grid coordinate as `(row, col)`
pub type Cell = (usize, usize);

/// North, south, east, west
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// Terrain table: cost of entering each cell type
///
/// The start and goal markers cost the same as `floor`. Characters that are
/// neither in `costs` nor marked impassable are treated as impassable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainCosts {
    pub costs: BTreeMap<char, f64>,
    pub impassable: BTreeSet<char>,
    pub floor: char,
    pub start: char,
    pub goal: char,
}

impl Default for TerrainCosts {
    fn default() -> Self {
        Self {
            costs: BTreeMap::from([('.', 1.0), ('~', 3.0)]),
            impassable: BTreeSet::from(['#']),
            floor: '.',
            start: 'S',
            goal: 'G',
        }
    }
}

impl TerrainCosts {
    /// Load a terrain table from JSON, filling omitted fields with defaults
    ///
    /// ```json
    /// {"costs": {".": 1.0, "~": 3.0, "^": 5.0}, "impassable": ["#"]}
    /// ```
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ToolResult<Self> {
        let text = fs::read_to_string(path)?;
        let terrain: TerrainCosts = serde_json::from_str(&text)?;
        terrain.validate()?;
        Ok(terrain)
    }

    /// Costs must be finite and positive, and the floor must have a cost
    pub fn validate(&self) -> ToolResult<()> {
        for (&cell, &cost) in &self.costs {
            if !cost.is_finite() || cost <= 0.0 {
                return Err(malformed(format!(
                    "terrain '{}' has cost {}; costs must be finite and positive",
                    cell, cost
                )));
            }
        }
        if !self.costs.contains_key(&self.floor) {
            return Err(malformed(format!("floor terrain '{}' has no cost", self.floor)));
        }
        Ok(())
    }

    /// Cost of stepping into a cell, `None` if it cannot be entered
    pub fn entry_cost(&self, cell: char) -> Option<f64> {
        if self.impassable.contains(&cell) {
            return None;
        }
        let key = if cell == self.start || cell == self.goal {
            self.floor
        } else {
            cell
        };
        self.costs.get(&key).copied()
    }

    fn is_known(&self, cell: char) -> bool {
        cell == self.start
            || cell == self.goal
            || self.impassable.contains(&cell)
            || self.costs.contains_key(&cell)
    }
}

/// Rectangular character grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<char>>,
}

impl Grid {
    /// Parse the `rows cols` header and the grid lines
    ///
    /// Surrounding whitespace on each line and blank lines are ignored.
    pub fn parse(text: &str) -> ToolResult<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (header_no, header) = lines
            .next()
            .ok_or_else(|| malformed("empty grid: missing 'rows cols' header"))?;
        let dims: Vec<usize> = header
            .split_whitespace()
            .map(|t| t.parse::<usize>())
            .collect::<Result<_, _>>()
            .map_err(|_| malformed(format!("line {}: invalid grid header '{}'", header_no, header)))?;
        if dims.len() != 2 {
            return Err(malformed(format!(
                "line {}: expected 'rows cols', found {} values",
                header_no,
                dims.len()
            )));
        }
        let (rows, cols) = (dims[0], dims[1]);

        let mut cells = Vec::with_capacity(rows.min(1024));
        for (line_no, line) in lines {
            if cells.len() == rows {
                return Err(malformed(format!(
                    "line {}: more than the {} rows declared in the header",
                    line_no, rows
                )));
            }
            let row: Vec<char> = line.chars().collect();
            if row.len() != cols {
                return Err(malformed(format!(
                    "line {}: expected {} columns, found {}",
                    line_no,
                    cols,
                    row.len()
                )));
            }
            cells.push(row);
        }

        if cells.len() != rows {
            return Err(malformed(format!(
                "header declares {} rows but only {} were found",
                rows,
                cells.len()
            )));
        }

        Ok(Self { rows, cols, cells })
    }

    /// Build a grid from already-split lines (no header)
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> ToolResult<Self> {
        let cells: Vec<Vec<char>> = lines.iter().map(|l| l.as_ref().chars().collect()).collect();
        let cols = cells.first().map(Vec::len).unwrap_or(0);
        if let Some(row) = cells.iter().position(|r| r.len() != cols) {
            return Err(malformed(format!(
                "row {}: expected {} columns, found {}",
                row,
                cols,
                cells[row].len()
            )));
        }
        Ok(Self {
            rows: cells.len(),
            cols,
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell(&self, (row, col): Cell) -> Option<char> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Rows rendered back to strings
    pub fn lines(&self) -> Vec<String> {
        self.cells.iter().map(|r| r.iter().collect()).collect()
    }

    /// All cells holding `marker`, in row-major order
    pub fn find_all(&self, marker: char) -> Vec<Cell> {
        let mut found = Vec::new();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, &ch) in row.iter().enumerate() {
                if ch == marker {
                    found.push((r, c));
                }
            }
        }
        found
    }

    fn neighbor(&self, (row, col): Cell, (dr, dc): (isize, isize)) -> Option<Cell> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < self.rows && c < self.cols).then_some((r, c))
    }
}

/// Read and parse a grid file
pub fn read_grid<P: AsRef<Path>>(path: P) -> ToolResult<Grid> {
    let text = fs::read_to_string(path)?;
    Grid::parse(&text)
}

/// Directed graph derived from a grid, with its start and goal vertices
///
/// Cell `(r, c)` is vertex `r * cols + c`.
#[derive(Debug, Clone)]
pub struct GridGraph {
    graph: WeightedGraph,
    rows: usize,
    cols: usize,
    start: Cell,
    goal: Cell,
}

impl GridGraph {
    /// Convert a grid into a directed weighted graph
    ///
    /// # Errors
    /// * `MalformedInput` if the start or goal marker is missing or repeated
    /// * `MalformedInput` if the terrain table is invalid
    pub fn build(grid: &Grid, terrain: &TerrainCosts) -> ToolResult<Self> {
        terrain.validate()?;
        let start = single_marker(grid, terrain.start, "start")?;
        let goal = single_marker(grid, terrain.goal, "goal")?;

        let mut graph = WeightedGraph::directed(grid.rows() * grid.cols())?;
        let mut unknown = BTreeSet::new();

        for r in 0..grid.rows() {
            for c in 0..grid.cols() {
                let ch = grid.cells[r][c];
                if !terrain.is_known(ch) {
                    unknown.insert(ch);
                }
                // Impassable cells have no outgoing moves either
                if terrain.entry_cost(ch).is_none() {
                    continue;
                }

                let v = r * grid.cols() + c;
                for dir in DIRECTIONS {
                    let Some((nr, nc)) = grid.neighbor((r, c), dir) else {
                        continue;
                    };
                    if let Some(cost) = terrain.entry_cost(grid.cells[nr][nc]) {
                        graph.add_edge(v, nr * grid.cols() + nc, cost)?;
                    }
                }
            }
        }

        if !unknown.is_empty() {
            tracing::warn!(cells = ?unknown, "unknown terrain treated as impassable");
        }
        tracing::debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            edges = graph.edge_count(),
            "grid converted to graph"
        );

        Ok(Self {
            graph,
            rows: grid.rows(),
            cols: grid.cols(),
            start,
            goal,
        })
    }

    pub fn graph(&self) -> &WeightedGraph {
        &self.graph
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn start_vertex(&self) -> usize {
        self.vertex(self.start)
    }

    pub fn goal_vertex(&self) -> usize {
        self.vertex(self.goal)
    }

    /// Vertex index of a cell
    pub fn vertex(&self, (row, col): Cell) -> usize {
        row * self.cols + col
    }

    /// Cell of a vertex index, `None` outside the grid
    pub fn cell(&self, vertex: usize) -> Option<Cell> {
        (vertex < self.rows * self.cols).then(|| (vertex / self.cols, vertex % self.cols))
    }

    /// Map a vertex path to grid coordinates
    pub fn path_cells(&self, path: &[usize]) -> Vec<Cell> {
        path.iter().filter_map(|&v| self.cell(v)).collect()
    }
}

fn single_marker(grid: &Grid, marker: char, name: &str) -> ToolResult<Cell> {
    match grid.find_all(marker).as_slice() {
        [cell] => Ok(*cell),
        [] => Err(malformed(format!("grid has no {} cell '{}'", name, marker))),
        many => Err(malformed(format!(
            "grid has {} {} cells '{}', expected exactly one",
            many.len(),
            name,
            marker
        ))),
    }
}
