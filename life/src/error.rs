use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifeError {
    #[error("invalid neighbor count: {0}")]
    InvalidNeighborCount(usize),

    #[error("grid has no rows")]
    EmptyGrid,

    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },

    #[error("invalid cell character {0:?}")]
    InvalidCell(char),
}

pub type Result<T> = std::result::Result<T, LifeError>;
