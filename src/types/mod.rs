/// Core value types shared by the graph and the solvers
///
/// - Distance: edge cost / path length with an explicit infinite value
/// - SquareMatrix: dense N×N storage (distance and routing matrices)
/// - IndexBase: 0-based / 1-based vertex numbering at the I/O boundary

pub mod distance;
pub mod matrix;
pub mod vertex;

pub use distance::Distance;
pub use matrix::{DistanceMatrix, RoutingMatrix, SquareMatrix};
pub use vertex::IndexBase;
