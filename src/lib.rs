//! A sliding-tile 2048 engine with a greedy autoplayer.
//!
//! [`engine::Grid`] is a value: moves, tile spawns and classification each return a new grid, so
//! a driver owns the only "current" state and can probe candidate moves freely.
//! [`selector::choose_move`] scores every legal move with a static heuristic and picks the best.

pub mod autoplay;
pub mod config;
pub mod engine;
pub mod error;
pub mod selector;
