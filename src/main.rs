//! Rubykon demo binary.
//!
//! ## Usage
//!
//! - `rubykon` - Play a short Go game with MCTS on both sides
//! - `rubykon demo --size 7 --playouts 300` - Same, with options
//! - `rubykon double-step` - Search the toy race game

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use tracing::info;

use rubykon::constants::DEFAULT_PLAYOUTS;
use rubykon::double_step::DoubleStep;
use rubykon::game::{Game, GameConfig};
use rubykon::mcts::{SearchConfig, dump_children, tree_search};
use rubykon::stone::Color;

// Demo defaults, also used when no subcommand is given.
const DEMO_SIZE: usize = 7;
const DEMO_PLAYOUTS: usize = 200;
const DEMO_MOVES: usize = 20;

/// Rubykon: Go rules and Monte Carlo Tree Search
#[derive(Parser)]
#[command(name = "rubykon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Let MCTS play a Go game against itself and print the final board
    Demo {
        #[arg(long, default_value_t = DEMO_SIZE, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        size: usize,
        #[arg(long, default_value_t = DEMO_PLAYOUTS)]
        playouts: usize,
        /// Stop after this many moves
        #[arg(long, default_value_t = DEMO_MOVES)]
        moves: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Search the toy race game from an optional head start
    DoubleStep {
        #[arg(long, default_value_t = 0)]
        black: u32,
        #[arg(long, default_value_t = 0)]
        white: u32,
        #[arg(long, default_value_t = DEFAULT_PLAYOUTS)]
        playouts: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rubykon=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Demo {
            size,
            playouts,
            moves,
            seed,
        }) => run_demo(size, playouts, moves, seed),
        None => run_demo(DEMO_SIZE, DEMO_PLAYOUTS, DEMO_MOVES, None),
        Some(Commands::DoubleStep {
            black,
            white,
            playouts,
            seed,
        }) => run_double_step(black, white, playouts, seed),
    }
}

fn run_demo(size: usize, playouts: usize, moves: usize, seed: Option<u64>) -> Result<()> {
    println!("Rubykon: Go MCTS demo on a {size}x{size} board\n");

    let mut game = Game::with_config(GameConfig {
        size,
        ..GameConfig::default()
    })?;
    for turn in 0..moves {
        if game.finished() {
            break;
        }
        let config = SearchConfig {
            playouts,
            seed: seed.map(|s| s.wrapping_add(turn as u64)),
            ..SearchConfig::default()
        };
        let tree = tree_search(game.dup(), &config)?;
        let mv = tree.best_move().context("search found no move")?;
        info!(turn, %mv, "playing");
        game.play_move(mv)?;
    }

    println!("{}", game.board());
    let score = game.score();
    println!(
        "Moves: {}  Prisoners: black {} white {}",
        game.move_count(),
        game.prisoners(Color::Black),
        game.prisoners(Color::White)
    );
    println!("Score: black {:.1} white {:.1}", score.black, score.white);
    Ok(())
}

fn run_double_step(black: u32, white: u32, playouts: usize, seed: Option<u64>) -> Result<()> {
    let config = SearchConfig {
        playouts,
        seed,
        ..SearchConfig::default()
    };
    let tree = tree_search(DoubleStep::with_positions(black, white), &config)?;
    dump_children(&tree);
    match tree.best_move() {
        Some(steps) => println!("Best move: {steps}"),
        None => println!("Game already finished"),
    }
    Ok(())
}
