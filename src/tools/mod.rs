/// Input loaders and output formatting
///
/// This module holds the collaborators around the core engine: parsers that
/// turn edge-list and grid text into plain data, adapters that build a
/// `WeightedGraph` from that data, and renderers for matrices, paths and
/// JSON/CSV reports.

pub mod edge_list;
pub mod export;
pub mod grid;

pub use edge_list::{
    import_graph, parse_edge_list, parse_edges_csv, read_edge_list, EdgeList, EdgeRecord,
    ImportOptions,
};
pub use export::{
    format_distance_matrix, format_path, format_routing_matrix, overlay_path, write_distance_csv,
    write_json, CentralityReport, ExportFormat, GridRouteReport, RouteReport,
};
pub use grid::{read_grid, Cell, Grid, GridGraph, TerrainCosts};

use crate::graph::GraphError;
use thiserror::Error;

/// Import/export errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

pub type ToolResult<T> = Result<T, ToolError>;

pub(crate) fn malformed(message: impl Into<String>) -> ToolError {
    ToolError::MalformedInput(message.into())
}
