//! Heuristic game simulation for position evaluation.
//!
//! This module implements the playouts used by the tree search: full games
//! played silently to completion with both sides following the Roxanne
//! policy, a fixed square-priority table that grabs corners when it can and
//! postpones the corner-adjacent squares that would hand a corner over.
//! Roxanne is deterministic in tier order and randomized within a tier, so
//! it is both much stronger than uniform random play and cheap enough to run
//! thousands of times per decision.
//!
//! All randomness flows through an injected [`fastrand::Rng`], which keeps
//! playouts reproducible under a fixed seed.

use crate::board::{Board, Color, Outcome, Point};
use crate::constants::ROXANNE_TIERS;

/// Pick a move for `color` following the Roxanne priority table.
///
/// Scans the tiers from strongest to weakest and returns the first legal
/// square found; each tier is shuffled before the scan so equal-value
/// squares are chosen uniformly. Returns `None` when `color` has no legal
/// move (a pass).
pub fn roxanne_select(board: &Board, color: Color, rng: &mut fastrand::Rng) -> Option<Point> {
    let legal: Vec<Point> = board.legal_moves(color).collect();
    if legal.is_empty() {
        return None;
    }
    for tier in ROXANNE_TIERS {
        let mut squares = tier.to_vec();
        rng.shuffle(&mut squares);
        for sq in squares {
            if legal.contains(&sq) {
                return Some(sq);
            }
        }
    }
    // The tiers cover every playable square, so this is unreachable.
    legal.first().copied()
}

/// Play a game out to the end, Roxanne against Roxanne, starting with
/// `to_move`, and return the final score.
///
/// A side with no legal move passes; two passes in a row end the game
/// exactly like the real rules. Nothing is printed and only the given
/// board copy is mutated.
pub fn playout(board: &mut Board, mut to_move: Color, rng: &mut fastrand::Rng) -> (Outcome, u32) {
    let mut passes = 0;
    while passes < 2 {
        match roxanne_select(board, to_move, rng) {
            Some(mv) => {
                board
                    .play(mv, to_move)
                    .expect("rollout picked an illegal move");
                passes = 0;
            }
            None => passes += 1,
        }
        to_move = to_move.opponent();
    }
    board.score()
}
