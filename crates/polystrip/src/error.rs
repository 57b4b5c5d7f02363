/// Errors reported by the bounds-checked tessellation entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TessellationError {
    /// The destination cannot hold the whole strip.
    BufferTooSmall { required: usize, capacity: usize },

    /// The coordinate array does not hold whole `(x, y)` pairs.
    OddCoordinateCount(usize),

    /// A polyline start offset is negative or lies past the point array.
    InvalidOffset {
        polyline: usize,
        offset: i32,
        point_count: usize,
    },

    /// Polyline start offsets go backwards.
    UnorderedOffsets { polyline: usize },
}

impl std::fmt::Display for TessellationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TessellationError::BufferTooSmall { required, capacity } => write!(
                f,
                "Vertex buffer too small: {} bytes required but capacity is {}",
                required, capacity
            ),
            TessellationError::OddCoordinateCount(count) => {
                write!(f, "Coordinate count {} is not a whole number of points", count)
            }
            TessellationError::InvalidOffset {
                polyline,
                offset,
                point_count,
            } => write!(
                f,
                "Polyline {} starts at offset {} outside {} points",
                polyline, offset, point_count
            ),
            TessellationError::UnorderedOffsets { polyline } => {
                write!(f, "Polyline {} starts before the previous polyline", polyline)
            }
        }
    }
}

impl std::error::Error for TessellationError {}

/// Result type for tessellation operations.
pub type TessellationResult<T> = Result<T, TessellationError>;
