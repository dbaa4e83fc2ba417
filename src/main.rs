//! Console Othello against an MCTS opponent.
//!
//! ## Usage
//!
//! - `othello-mcts` - Play an interactive match (human holds Black)
//! - `othello-mcts play --color white` - Play holding White instead
//! - `othello-mcts demo` - Search the opening position and show statistics

use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use othello_mcts::board::{Board, Color, str_coord};
use othello_mcts::constants::SEARCH_TIME;
use othello_mcts::game::Game;
use othello_mcts::mcts::{TreeNode, dump_children, tree_search};
use othello_mcts::players::{AiPlayer, HumanPlayer};

/// Console Othello with a Monte Carlo Tree Search engine
#[derive(Parser)]
#[command(name = "othello-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive match against the engine
    Play {
        /// Side for the human player ("black" or "white")
        #[arg(long, default_value = "black")]
        color: String,
        /// Engine thinking time per move, in seconds
        #[arg(long, default_value_t = 2)]
        time_limit: u64,
        /// Seed for the engine's random source (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Search the opening position once and print move statistics
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play {
            color,
            time_limit,
            seed,
        }) => {
            let human = match color.to_lowercase().as_str() {
                "black" | "x" => Color::Black,
                "white" | "o" => Color::White,
                other => bail!("unknown color '{other}', expected black or white"),
            };
            run_match(human, Duration::from_secs(time_limit), seed)
        }
        Some(Commands::Demo) => run_demo(),
        None => run_match(Color::Black, SEARCH_TIME, None),
    }
}

fn run_match(human: Color, time_limit: Duration, seed: Option<u64>) -> Result<()> {
    let mut game = match human {
        Color::Black => Game::new(
            Box::new(HumanPlayer::new(Color::Black)),
            Box::new(AiPlayer::new(Color::White, time_limit, seed)),
        ),
        Color::White => Game::new(
            Box::new(AiPlayer::new(Color::Black, time_limit, seed)),
            Box::new(HumanPlayer::new(Color::White)),
        ),
    };
    game.run()?;
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Othello MCTS demo\n");

    let board = Board::new();
    println!("{board}");

    println!("Searching the opening position for Black...");
    let mut rng = fastrand::Rng::new();
    let mut root = TreeNode::new(Color::Black);
    match tree_search(&mut root, &board, SEARCH_TIME, &mut rng) {
        Some(mv) => {
            dump_children(&root);
            println!("\nChosen move: {} after {} simulations", str_coord(mv), root.n);
            println!("Root winrate: {:.1}%", root.winrate() * 100.0);
        }
        None => println!("No legal move available"),
    }
    Ok(())
}
