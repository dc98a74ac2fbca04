use crate::dims::Dims;

#[derive(thiserror::Error, Debug)]
pub enum MazeError {
    #[error("maze dimensions must be positive, got {height}x{width}")]
    InvalidDimensions { height: i64, width: i64 },
    #[error("cell {0:?} is outside of the maze")]
    OutOfBounds(Dims),
    #[error("malformed maze on line {line}: {reason}")]
    MalformedSerialization { line: usize, reason: String },
    #[error("cells {0:?} and {1:?} are not neighbors")]
    IllegalAdjacency(Dims, Dims),
    #[error("failed to read or write maze file: {0}")]
    Io(#[from] std::io::Error),
}
