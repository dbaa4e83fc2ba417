//! An Othello/Reversi engine driven by Monte Carlo Tree Search.
//!
//! This crate provides the full move engine for 8x8 Othello together with a
//! time-bounded MCTS move chooser whose playouts follow the Roxanne square
//! priority heuristic, plus the console match layer built on top of them.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, search timing, and the Roxanne table
//! - [`board`] - Core game logic (board state, flips, scoring, coordinates)
//! - [`playout`] - Roxanne policy and silent game simulation
//! - [`mcts`] - Monte Carlo Tree Search with UCB1 selection
//! - [`players`] - Human, MCTS, and Roxanne players
//! - [`game`] - Interactive match orchestration
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//!
//! use othello_mcts::board::{Board, Color, parse_coord};
//! use othello_mcts::mcts::{TreeNode, tree_search};
//!
//! // Open with D3 for Black.
//! let mut board = Board::new();
//! board.play(parse_coord("D3").unwrap(), Color::Black).unwrap();
//!
//! // Search for White's reply.
//! let mut rng = fastrand::Rng::with_seed(42);
//! let mut root = TreeNode::new(Color::White);
//! let reply = tree_search(&mut root, &board, Duration::from_millis(100), &mut rng);
//! assert!(reply.is_some());
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod mcts;
pub mod players;
pub mod playout;
