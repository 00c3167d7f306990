/// Edge-list import
///
/// Supports two on-disk formats:
/// - Whitespace text: `vertexCount edgeCount` header, then one `v w weight` line per edge
/// - CSV with a `source,target,weight` header
///
/// Parsing produces a plain [`EdgeList`]; building the graph is a separate
/// step so the parser can be tested without touching graph state.

use super::{malformed, ToolResult};
use crate::graph::{GraphOps, WeightedGraph};
use crate::types::IndexBase;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

/// Import options
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Numbering used by the file's vertex ids
    pub base: IndexBase,
    /// Build a directed graph instead of an undirected one
    pub directed: bool,
    /// Vertex count for CSV input (inferred from the largest id when absent)
    pub vertex_count: Option<usize>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            base: IndexBase::One,
            directed: false,
            vertex_count: None,
        }
    }
}

/// One edge as written in the file (external ids)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// Parsed edge list, not yet validated against graph bounds
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeList {
    pub vertex_count: usize,
    pub edges: Vec<EdgeRecord>,
    pub base: IndexBase,
}

impl EdgeList {
    /// Build a graph by inserting every edge in file order
    ///
    /// A later duplicate of the same pair overwrites the earlier weight.
    ///
    /// # Errors
    /// * `Graph(InvalidSize)` if the vertex count is zero
    /// * `Graph(OutOfRange)` / `MalformedInput` for ids outside the graph
    /// * `Graph(SelfLoop)` for `v v weight` lines
    pub fn build_graph(&self, directed: bool) -> ToolResult<WeightedGraph> {
        let mut graph = WeightedGraph::new(self.vertex_count, directed)?;

        for (i, edge) in self.edges.iter().enumerate() {
            let v = self.internal(i, edge.source)?;
            let w = self.internal(i, edge.target)?;
            graph.add_edge(v, w, edge.weight)?;
        }

        tracing::debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            directed,
            "graph built from edge list"
        );
        Ok(graph)
    }

    fn internal(&self, edge_index: usize, id: usize) -> ToolResult<usize> {
        self.base.to_internal(id).ok_or_else(|| {
            malformed(format!(
                "edge {}: vertex id {} is below the index base {}",
                edge_index + 1,
                id,
                self.base
            ))
        })
    }
}

/// Parse the whitespace edge-list format
///
/// ```text
/// 3 3
/// 1 2 1
/// 2 3 1
/// 1 3 5
/// ```
///
/// Blank lines are ignored. The number of edge lines must match the header.
pub fn parse_edge_list(text: &str, base: IndexBase) -> ToolResult<EdgeList> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_no, header) = lines
        .next()
        .ok_or_else(|| malformed("empty edge list: missing 'vertexCount edgeCount' header"))?;
    let header: Vec<&str> = header.split_whitespace().collect();
    if header.len() != 2 {
        return Err(malformed(format!(
            "line {}: expected 'vertexCount edgeCount', found {} tokens",
            header_no,
            header.len()
        )));
    }
    let vertex_count = parse_int(header[0], header_no, "vertex count")?;
    let edge_count = parse_int(header[1], header_no, "edge count")?;

    // The header is untrusted; grow past this as lines actually arrive
    let mut edges = Vec::with_capacity(edge_count.min(1024));
    for (line_no, line) in lines {
        if edges.len() == edge_count {
            return Err(malformed(format!(
                "line {}: more edge lines than the {} declared in the header",
                line_no, edge_count
            )));
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(malformed(format!(
                "line {}: expected 'v w weight', found {} tokens",
                line_no,
                tokens.len()
            )));
        }
        let weight: f64 = tokens[2].parse().map_err(|_| {
            malformed(format!("line {}: invalid weight '{}'", line_no, tokens[2]))
        })?;
        edges.push(EdgeRecord {
            source: parse_int(tokens[0], line_no, "vertex")?,
            target: parse_int(tokens[1], line_no, "vertex")?,
            weight,
        });
    }

    if edges.len() != edge_count {
        return Err(malformed(format!(
            "header declares {} edges but only {} were found",
            edge_count,
            edges.len()
        )));
    }

    Ok(EdgeList {
        vertex_count,
        edges,
        base,
    })
}

/// Read and parse a whitespace edge-list file
pub fn read_edge_list<P: AsRef<Path>>(path: P, base: IndexBase) -> ToolResult<EdgeList> {
    let text = fs::read_to_string(path)?;
    parse_edge_list(&text, base)
}

/// Parse CSV edges with a `source,target,weight` header
///
/// CSV format:
/// ```csv
/// source,target,weight
/// 1,2,17
/// 1,3,25
/// ```
pub fn parse_edges_csv<R: Read>(
    reader: R,
    base: IndexBase,
    vertex_count: Option<usize>,
) -> ToolResult<EdgeList> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut edges = Vec::new();
    for result in csv_reader.deserialize() {
        let edge: EdgeRecord = result?;
        edges.push(edge);
    }

    let vertex_count = match vertex_count {
        Some(n) => n,
        None => {
            let max_id = edges
                .iter()
                .map(|e| e.source.max(e.target))
                .max()
                .ok_or_else(|| malformed("CSV edge list is empty; vertex count cannot be inferred"))?;
            max_id.saturating_add(1).saturating_sub(base.offset())
        }
    };

    Ok(EdgeList {
        vertex_count,
        edges,
        base,
    })
}

/// Load a graph from disk, choosing the format by file extension
///
/// `.csv` files go through [`parse_edges_csv`], everything else through
/// [`parse_edge_list`].
pub fn import_graph<P: AsRef<Path>>(path: P, options: &ImportOptions) -> ToolResult<WeightedGraph> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let edge_list = if is_csv {
        let reader = BufReader::new(File::open(path)?);
        parse_edges_csv(reader, options.base, options.vertex_count)?
    } else {
        read_edge_list(path, options.base)?
    };

    tracing::info!(
        path = %path.display(),
        vertices = edge_list.vertex_count,
        edges = edge_list.edges.len(),
        "edge list loaded"
    );
    edge_list.build_graph(options.directed)
}

fn parse_int(token: &str, line_no: usize, what: &str) -> ToolResult<usize> {
    token
        .parse()
        .map_err(|_| malformed(format!("line {}: invalid {} '{}'", line_no, what, token)))
}
