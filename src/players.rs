//! Player implementations: console input, the MCTS engine, and the plain
//! Roxanne policy as a baseline opponent.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::board::{Board, Color, Point, parse_coord};
use crate::mcts::{TreeNode, tree_search};
use crate::playout::roxanne_select;

/// A decision returned by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMove {
    /// Place a stone on the given square.
    Place(Point),
    /// Give up the match; the board is scored as it stands.
    Quit,
}

/// One side of a match.
pub trait Player {
    /// The color this player is holding.
    fn color(&self) -> Color;

    /// Decide on a move for the current board.
    ///
    /// Only called when at least one legal move exists for this player's
    /// color. `Ok(None)` means the player found no move and passes; legality
    /// checking and re-prompting belong to the game loop.
    fn get_move(&mut self, board: &Board) -> Result<Option<PlayerMove>>;
}

/// A human typing coordinates on the console.
pub struct HumanPlayer {
    color: Color,
}

impl HumanPlayer {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Player for HumanPlayer {
    fn color(&self) -> Color {
        self.color
    }

    /// Prompt until the input is a well-formed square or a quit command.
    /// EOF on stdin counts as quitting.
    fn get_move(&mut self, _board: &Board) -> Result<Option<PlayerMove>> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        loop {
            write!(
                stdout,
                "{} ({}) to move, enter a square (e.g. D3) or Q to quit: ",
                self.color,
                self.color.disc()
            )?;
            stdout.flush()?;

            let mut line = String::new();
            let read = stdin
                .lock()
                .read_line(&mut line)
                .context("reading move from stdin")?;
            if read == 0 {
                return Ok(Some(PlayerMove::Quit));
            }
            let input = line.trim();
            if input.eq_ignore_ascii_case("q") {
                return Ok(Some(PlayerMove::Quit));
            }
            match parse_coord(input) {
                Some(pt) => return Ok(Some(PlayerMove::Place(pt))),
                None => writeln!(
                    stdout,
                    "'{input}' is not a square, use column A-H and row 1-8."
                )?,
            }
        }
    }
}

/// The MCTS engine bound to a color and a per-move time budget.
///
/// Builds a fresh search tree on every turn; nothing is carried over
/// between moves.
pub struct AiPlayer {
    color: Color,
    time_limit: Duration,
    rng: fastrand::Rng,
}

impl AiPlayer {
    /// `seed` fixes the engine's random source for reproducible play;
    /// `None` seeds from entropy.
    pub fn new(color: Color, time_limit: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            color,
            time_limit,
            rng,
        }
    }
}

impl Player for AiPlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn get_move(&mut self, board: &Board) -> Result<Option<PlayerMove>> {
        let mut root = TreeNode::new(self.color);
        let choice = tree_search(&mut root, board, self.time_limit, &mut self.rng);
        Ok(choice.map(PlayerMove::Place))
    }
}

/// The rollout policy playing directly, without any search.
pub struct RoxannePlayer {
    color: Color,
    rng: fastrand::Rng,
}

impl RoxannePlayer {
    pub fn new(color: Color, seed: u64) -> Self {
        Self {
            color,
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Player for RoxannePlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn get_move(&mut self, board: &Board) -> Result<Option<PlayerMove>> {
        Ok(roxanne_select(board, self.color, &mut self.rng).map(PlayerMove::Place))
    }
}
