use thiserror;

use crate::engine::direction::Direction;
use crate::engine::grid::Tile;

/// The Result type for autoplay48.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid grid size {0}, a grid must be at least 2 x 2")]
    InvalidSize(usize),

    #[error("row {row} has {len} cells, expected {size}")]
    RaggedRow { row: usize, len: usize, size: usize },

    #[error("invalid tile value {value} at ridx({x},{y}), tiles must be 0 or a power of two")]
    InvalidTile { value: Tile, x: usize, y: usize },

    #[error("unknown direction {0:?}")]
    InvalidDirection(String),

    #[error("moving {0} does not change the grid")]
    IllegalMove(Direction),

    #[error("cannot spawn a tile on a full grid")]
    GridFull,

    #[error("io error")]
    StdIOError(#[from] std::io::Error),

    #[error("log error")]
    LogError(#[from] log::SetLoggerError),
}
