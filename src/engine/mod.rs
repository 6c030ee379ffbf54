pub mod direction;
pub mod game;
pub mod grid;

pub use direction::Direction;
pub use game::Game;
pub use grid::{Grid, Idx, Score, Status, Tile, DEFAULT_SIZE, MAX_TILE, WINNING_TILE};
