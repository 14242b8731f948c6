//! # weighted_astar
//!
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) pathfinding on weighted grids with
//! 8-directional movement. A cell with weight zero is blocked; any other weight is the cost of
//! leaving the cell, scaled by [DIAGONAL_COST_FACTOR] for diagonal moves. The heuristic is the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) to the destination.
//!
//! A [Pathfinder] allocates its per-cell search state once and resets only the cells a query
//! touched, so repeated queries on the same grid cost proportionally to the work they do rather
//! than to the size of the grid. The open set is a [MinHeap] of cell indices keyed by the live
//! estimated cost in the cell table.
//!
//! ```
//! use grid_util::point::Point;
//! use weighted_astar::Pathfinder;
//!
//! let mut pathfinder = Pathfinder::from_nested(&[[1, 1, 1], [1, 1, 1], [1, 1, 1]]).unwrap();
//! let path = pathfinder.get_path(Point::new(0, 0), Point::new(2, 2)).unwrap();
//! assert_eq!(path, vec![Point::new(1, 1), Point::new(2, 2)]);
//! ```
pub mod error;
pub mod heap;
pub mod pathfinder;
pub mod weight_grid;

pub use error::{HeapError, PathError};
pub use heap::MinHeap;
pub use pathfinder::Pathfinder;
pub use weight_grid::WeightGrid;

/// Factor applied to the source cell weight for a straight (north, south, east, west) move.
pub const ORTHOGONAL_COST_FACTOR: f64 = 1.0;
/// Factor applied to the source cell weight for a diagonal move.
pub const DIAGONAL_COST_FACTOR: f64 = 1.4142;
