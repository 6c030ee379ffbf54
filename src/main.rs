use anyhow::Result;
use clap::Parser;

use autoplay48::autoplay;
use autoplay48::config::Args;
use autoplay48::engine::Game;

fn main() -> Result<()> {
    let args = Args::parse();
    args.init_logging()?;

    let mut game = Game::new(args.size, args.rng())?;
    let mut strategy = args.strategy();
    let options = args.autoplay_options();

    for n in 0..args.games {
        if n > 0 {
            game.restart()?;
        }
        let summary = autoplay::play(&mut game, strategy.as_mut(), &options)?;
        println!("game {}/{}: {}", n + 1, args.games, summary);
        print!("{}", game.current());
    }
    if args.games > 1 {
        println!("best score: {}", game.best_score());
    }

    Ok(())
}
