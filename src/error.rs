use grid_util::point::Point;

/// Failures reported by [MinHeap](crate::heap::MinHeap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeapError {
    #[error("heap is empty")]
    EmptyQueue,
    #[error("index {index} out of range for heap of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failures reported by [Pathfinder](crate::pathfinder::Pathfinder) and
/// [WeightGrid](crate::weight_grid::WeightGrid).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("malformed grid: {0}")]
    MalformedGrid(String),
    #[error("coordinate {point} lies outside the {width}x{height} grid")]
    InvalidCoordinate {
        point: Point,
        width: usize,
        height: usize,
    },
    #[error(transparent)]
    Heap(#[from] HeapError),
}
