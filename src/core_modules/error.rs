use core::fmt;

/// Failures detected at the component boundaries of the segmentation engine.
///
/// All variants are fatal to the run they occur in: the engine never returns
/// a partially built partition. The degenerate no-surviving-edges case is not
/// represented here because it still yields a valid (all-singleton) partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentationError {
    /// The input grid has a zero dimension and cannot form a graph.
    InvalidGrid { height: usize, width: usize },
    /// A row of the input grid does not match the width of the first row.
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// A vertex index outside `[0, vertex_count)` reached the forest.
    /// This indicates a caller bug, not a recoverable condition.
    UnknownVertex { vertex: usize, vertex_count: usize },
}

impl fmt::Display for SegmentationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGrid { height, width } => {
                write!(f, "invalid grid shape: {height}x{width}")
            }
            Self::RaggedRow {
                row,
                expected,
                actual,
            } => {
                write!(f, "row {row} has width {actual}, expected {expected}")
            }
            Self::UnknownVertex {
                vertex,
                vertex_count,
            } => {
                write!(f, "vertex {vertex} outside range 0..{vertex_count}")
            }
        }
    }
}

impl std::error::Error for SegmentationError {}
