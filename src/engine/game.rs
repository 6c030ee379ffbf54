use rand::RngCore;

use super::direction::Direction;
use super::grid::{Grid, Score, Status};
use crate::error::Result;

/// Game is a driver-owned play session: it holds the only mutable reference to the current grid,
/// keeps the history of every grid reached in the current game, and tracks the best score seen
/// across restarts.
pub struct Game {
    rng: Box<dyn RngCore>,
    size: usize,
    rounds: Vec<Grid>,
    best_score: Score,
}

impl Game {
    /// Start a new game of the given size using the given random number generator.
    pub fn new(size: usize, mut rng: impl RngCore + 'static) -> Result<Self> {
        let mut rounds = Vec::with_capacity(2000);
        rounds.push(Grid::new_game(size, &mut rng)?);
        Ok(Self {
            rng: Box::new(rng),
            size,
            rounds,
            best_score: 0,
        })
    }

    pub fn current(&self) -> &Grid {
        self.rounds
            .last()
            .expect("a game must always have at least one round")
    }

    pub fn score(&self) -> Score {
        self.current().score()
    }

    pub fn best_score(&self) -> Score {
        self.best_score.max(self.score())
    }

    /// Number of moves applied since the game started.
    pub fn turns(&self) -> usize {
        self.rounds.len() - 1
    }

    pub fn status(&self) -> Status {
        self.current().status()
    }

    pub fn is_game_over(&self) -> bool {
        self.current().over()
    }

    /// shift plays one full turn: slide toward `direction`, spawn a tile if anything moved, then
    /// reclassify. Returns whether the move changed the grid; a move that changes nothing leaves
    /// the game untouched.
    pub fn shift(&mut self, direction: Direction) -> Result<bool> {
        let (moved, changed) = self.current().apply_move(direction);
        if !changed {
            log::trace!("{} does not change the grid", direction);
            return Ok(false);
        }
        let next = moved.spawn_tile(&mut *self.rng)?.classified();
        log::debug!(
            "turn {}: {} -> score {}, max tile {}",
            self.rounds.len(),
            direction,
            next.score(),
            next.max_tile()
        );
        if next.won() && !self.current().won() {
            log::info!("reached {} after {} turns", next.max_tile(), self.rounds.len());
        }
        self.rounds.push(next);
        Ok(true)
    }

    /// Throw the current game away and start over with a fresh grid, keeping the best score.
    pub fn restart(&mut self) -> Result<()> {
        self.best_score = self.best_score();
        let grid = Grid::new_game(self.size, &mut *self.rng)?;
        self.rounds.clear();
        self.rounds.push(grid);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn set_initial_round(&mut self, grid: Grid) {
        let mut v = Vec::with_capacity(1);
        v.push(grid);
        self.rounds = v;
    }
}
