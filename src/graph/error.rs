/// Error types for graph construction and mutation

use thiserror::Error;

/// Graph operation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Vertex count must be positive and its cost matrix must fit in memory
    #[error("Invalid graph size: {0} (vertex count must be positive and fit in memory)")]
    InvalidSize(usize),

    /// Vertex index outside `0..vertex_count`
    #[error("Vertex {vertex} out of range for graph with {vertex_count} vertices")]
    OutOfRange { vertex: usize, vertex_count: usize },

    /// Removal of an edge that does not exist
    #[error("Edge not found: {0} -> {1}")]
    EdgeNotFound(usize, usize),

    /// Self-loops would break the zero diagonal
    #[error("Self-loop on vertex {0} is not allowed")]
    SelfLoop(usize),

    /// NaN or infinite edge weight
    #[error("Invalid edge weight: {0}")]
    InvalidWeight(f64),
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;
