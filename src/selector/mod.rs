pub mod heuristic;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::engine::{Direction, Grid};

/// Strategy picks the next move for an autonomous game.
pub trait Strategy {
    /// Returns `None` only when no direction changes the grid.
    fn choose_move(&mut self, grid: &Grid) -> Option<Direction>;

    fn name(&self) -> &'static str;
}

/// One-ply greedy search: play every legal move and keep the one whose result evaluates best.
///
/// Ties go to the first direction in [`Direction::ALL`] order.
pub fn choose_move(grid: &Grid) -> Option<Direction> {
    let mut best: Option<(Direction, f64)> = None;
    for direction in Direction::ALL {
        let (next, changed) = grid.apply_move(direction);
        if !changed {
            continue;
        }
        let score = heuristic::evaluate(&next);
        log::trace!("{} evaluates to {}", direction, score);
        match best {
            Some((_, best_score)) if score <= best_score => (),
            _ => best = Some((direction, score)),
        }
    }
    best.map(|(direction, _)| direction)
}

/// Greedy drives [`choose_move`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Greedy;

impl Strategy for Greedy {
    fn choose_move(&mut self, grid: &Grid) -> Option<Direction> {
        choose_move(grid)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// RandomMoves picks uniformly among the legal moves; useful as a baseline for the greedy search.
pub struct RandomMoves<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomMoves<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Strategy for RandomMoves<R> {
    fn choose_move(&mut self, grid: &Grid) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|direction| grid.can_move(*direction))
            .choose(&mut self.rng)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
