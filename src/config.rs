use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::autoplay::Options;
use crate::engine::DEFAULT_SIZE;
use crate::error::Result;
use crate::selector::{Greedy, RandomMoves, Strategy};

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum StrategyKind {
    /// One-ply search over a positional heuristic.
    #[default]
    Greedy,
    /// Uniformly random legal moves.
    Random,
}

/// Plays 2048 on its own and reports how far it got.
#[derive(Debug, Parser)]
#[command(name = "autoplay48", version)]
pub struct Args {
    /// Width and height of the grid.
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// Seed for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of games to play in a row.
    #[arg(long, default_value_t = 1)]
    pub games: usize,

    /// Stop a game after this many moves.
    #[arg(long)]
    pub max_moves: Option<usize>,

    #[arg(long, value_enum, default_value_t = StrategyKind::Greedy)]
    pub strategy: StrategyKind,

    /// Stop a game once 2048 is reached instead of playing on.
    #[arg(long)]
    pub stop_on_win: bool,

    /// Pause between moves, in milliseconds.
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Args {
    /// Random source for tile spawning.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn strategy(&self) -> Box<dyn Strategy> {
        match self.strategy {
            StrategyKind::Greedy => Box::new(Greedy),
            StrategyKind::Random => {
                // kept apart from the spawning rng so both sequences stay reproducible
                let rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
                    None => StdRng::from_entropy(),
                };
                Box::new(RandomMoves::new(rng))
            }
        }
    }

    pub fn autoplay_options(&self) -> Options {
        Options {
            max_moves: self.max_moves,
            stop_on_win: self.stop_on_win,
            delay: Duration::from_millis(self.delay_ms),
        }
    }

    pub fn init_logging(&self) -> Result<()> {
        let dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {}] {}",
                    record.level(),
                    record.target(),
                    message,
                ))
            })
            .level(self.verbose.log_level_filter());
        let dispatch = match &self.log_file {
            Some(path) => dispatch.chain(fern::log_file(path)?),
            None => dispatch.chain(std::io::stderr()),
        };
        dispatch.apply()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use rand::RngCore;

    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["autoplay48"]).unwrap();
        assert_eq!(args.size, 4);
        assert_eq!(args.games, 1);
        assert_eq!(args.strategy, StrategyKind::Greedy);
        assert_eq!(args.verbose.log_level_filter(), log::LevelFilter::Info);
        let options = args.autoplay_options();
        assert_eq!(options.max_moves, None);
        assert!(!options.stop_on_win);
        assert!(options.delay.is_zero());
    }

    #[test]
    fn flags() {
        let args = Args::try_parse_from([
            "autoplay48",
            "--size",
            "5",
            "--seed",
            "9",
            "--max-moves",
            "100",
            "--strategy",
            "random",
            "--stop-on-win",
            "--delay-ms",
            "50",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.size, 5);
        assert_eq!(args.strategy, StrategyKind::Random);
        assert_eq!(args.strategy().name(), "random");
        assert_eq!(args.verbose.log_level_filter(), log::LevelFilter::Debug);
        let options = args.autoplay_options();
        assert_eq!(options.max_moves, Some(100));
        assert!(options.stop_on_win);
        assert_eq!(options.delay, Duration::from_millis(50));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let args = Args::try_parse_from(["autoplay48", "--seed", "17"]).unwrap();
        assert_eq!(args.rng().next_u64(), args.rng().next_u64());
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert!(Args::try_parse_from(["autoplay48", "--strategy", "expectimax"]).is_err());
    }
}
