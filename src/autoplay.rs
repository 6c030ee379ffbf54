use std::time::Duration;

use crate::engine::{Game, Score, Tile};
use crate::error::{Error, Result};
use crate::selector::Strategy;

/// Options bounds an autoplay run.
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Stop after this many turns of the current game.
    pub max_moves: Option<usize>,
    /// Stop as soon as the game is won instead of playing on.
    pub stop_on_win: bool,
    /// Pause between turns.
    pub delay: Duration,
}

/// Summary describes where an autoplay run stopped.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub turns: usize,
    pub score: Score,
    pub max_tile: Tile,
    pub won: bool,
    pub over: bool,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let outcome = match (self.won, self.over) {
            (true, true) => "won, then ran out of moves",
            (true, false) => "won",
            (false, true) => "game over",
            (false, false) => "stopped",
        };
        write!(
            f,
            "{0} after {1} turns, score {2}, max tile {3}",
            outcome, self.turns, self.score, self.max_tile
        )
    }
}

/// play lets `strategy` drive `game` one turn at a time until the game is over or one of the
/// limits in `options` is reached.
pub fn play<S: Strategy + ?Sized>(
    game: &mut Game,
    strategy: &mut S,
    options: &Options,
) -> Result<Summary> {
    log::info!("autoplay with the {} strategy", strategy.name());
    loop {
        if game.is_game_over() {
            break;
        }
        if options.stop_on_win && game.status().won {
            break;
        }
        if options.max_moves.map_or(false, |max| game.turns() >= max) {
            log::debug!("move limit reached");
            break;
        }
        let direction = match strategy.choose_move(game.current()) {
            Some(d) => d,
            None => {
                log::warn!("no legal move left on an unclassified grid");
                break;
            }
        };
        if !game.shift(direction)? {
            return Err(Error::IllegalMove(direction));
        }
        if !options.delay.is_zero() {
            std::thread::sleep(options.delay);
        }
    }

    let grid = game.current();
    let status = grid.classify();
    let summary = Summary {
        turns: game.turns(),
        score: grid.score(),
        max_tile: grid.max_tile(),
        won: status.won,
        over: status.over,
    };
    log::info!("{}", summary);
    Ok(summary)
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::engine::{Direction, Grid, DEFAULT_SIZE};
    use crate::selector::{Greedy, RandomMoves};

    struct AlwaysLeft;

    impl Strategy for AlwaysLeft {
        fn choose_move(&mut self, _grid: &Grid) -> Option<Direction> {
            Some(Direction::Left)
        }

        fn name(&self) -> &'static str {
            "always-left"
        }
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn game(seed: u64) -> Game {
        Game::new(DEFAULT_SIZE, SmallRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn greedy_plays_until_over() {
        init_logger();
        let mut g = game(42);
        let summary = play(&mut g, &mut Greedy, &Options::default()).unwrap();

        assert!(summary.over);
        assert!(g.current().classify().over);
        assert!(summary.turns > 0);
        assert_eq!(summary.turns, g.turns());
        assert_eq!(summary.score, g.score());
        assert_eq!(summary.max_tile, g.current().max_tile());
    }

    #[test]
    fn greedy_beats_random_on_average() {
        init_logger();
        let games = 5;
        let mut greedy = 0;
        let mut random = 0;
        for seed in 0..games {
            let mut g = game(seed);
            greedy += play(&mut g, &mut Greedy, &Options::default())
                .unwrap()
                .score;

            let mut g = game(seed);
            let mut strategy = RandomMoves::new(SmallRng::seed_from_u64(seed));
            random += play(&mut g, &mut strategy, &Options::default())
                .unwrap()
                .score;
        }
        assert!(greedy > random, "greedy {} random {}", greedy, random);
    }

    #[test]
    fn stops_at_move_limit() {
        init_logger();
        let mut g = game(1);
        let options = Options {
            max_moves: Some(10),
            ..Options::default()
        };
        let summary = play(&mut g, &mut Greedy, &options).unwrap();
        assert_eq!(summary.turns, 10);
        assert!(!summary.over);
    }

    #[test]
    fn stops_on_win_when_asked() {
        init_logger();
        let mut g = game(3);
        g.set_initial_round(
            Grid::from_rows(&[[0, 0, 0, 0], [0; 4], [0; 4], [0, 0, 1024, 1024]]).unwrap(),
        );
        let options = Options {
            stop_on_win: true,
            ..Options::default()
        };
        let summary = play(&mut g, &mut Greedy, &options).unwrap();
        assert!(summary.won);
        assert_eq!(summary.max_tile, 2048);
        assert!(!summary.over);
    }

    #[test]
    fn rejects_a_move_that_changes_nothing() {
        init_logger();
        let mut g = game(5);
        g.set_initial_round(Grid::from_rows(&[[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap());
        let options = Options {
            max_moves: Some(5),
            ..Options::default()
        };
        let err = play(&mut g, &mut AlwaysLeft, &options).unwrap_err();
        assert!(matches!(err, Error::IllegalMove(Direction::Left)));
        assert_eq!(g.turns(), 0);
    }

    #[test]
    fn does_nothing_on_a_finished_game() {
        let mut g = game(9);
        g.set_initial_round(
            Grid::from_rows(&[[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]])
                .unwrap()
                .classified(),
        );
        let summary = play(&mut g, &mut Greedy, &Options::default()).unwrap();
        assert_eq!(summary.turns, 0);
        assert!(summary.over);
        assert_eq!(summary.to_string(), "game over after 0 turns, score 0, max tile 4");
    }
}
