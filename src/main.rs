use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use wrapsnake::game::SnakeGame;
use wrapsnake::logger::init_logger;
use wrapsnake::{log, GameState, Result};

/// Snake on a wraparound grid
#[derive(Parser, Debug)]
#[command(name = "wrapsnake")]
#[command(version, about = "Classic snake on a 20x20 grid whose edges wrap around", long_about = None)]
struct Args {
    /// Seed for food placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Append a timestamped event log to this file
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("wrapsnake: {}", e);
        exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    if let Some(path) = &args.log_file {
        init_logger(path)?;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log!("starting with seed {}", seed);

    let state = GameState::with_rng(StdRng::seed_from_u64(seed));
    let mut game = SnakeGame::new(state)?;
    game.run()
}
