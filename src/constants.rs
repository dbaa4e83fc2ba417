//! Constants for board geometry, search timing, match rules, and the
//! Roxanne priority table.
//!
//! The board is a fixed 8x8 grid; there is no alternative-size support.

use std::time::Duration;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Total number of squares.
pub const BOARDSIZE: usize = N * N;

/// Offsets to neighboring squares as (row, col) deltas.
/// Order: N, NE, E, SE, S, SW, W, NW.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

// =============================================================================
// Search Parameters
// =============================================================================

/// Default thinking time per AI move.
pub const SEARCH_TIME: Duration = Duration::from_secs(2);

/// Reserved slice of the time budget: the search loop stops this long before
/// the budget expires so the iteration in flight can finish and return.
pub const SAFETY_MARGIN: Duration = Duration::from_secs(1);

/// Exploration constant in the UCB1 term `sqrt(C * ln(N) / n)`.
pub const UCB_EXPLORATION: f64 = 2.0;

// =============================================================================
// Match Rules
// =============================================================================

/// A player thinking longer than this on a single move forfeits the game.
pub const MOVE_TIMEOUT: Duration = Duration::from_secs(60);

/// Illegal move attempts allowed per turn before forfeiting.
pub const MAX_MOVE_ATTEMPTS: usize = 3;

// =============================================================================
// Roxanne Priority Table
// =============================================================================

/// Square priority tiers for the rollout policy, strongest first.
///
/// Corners are taken whenever available; the squares next to a corner (the
/// last two tiers) hand the corner to the opponent and are tried last. Each
/// tier holds squares of equal value as (row, col) pairs; the four center
/// squares are occupied from the opening and never appear.
pub const ROXANNE_TIERS: [&[(usize, usize)]; 9] = [
    // A1 H1 A8 H8
    &[(0, 0), (0, 7), (7, 0), (7, 7)],
    // C3 F3 C6 F6
    &[(2, 2), (2, 5), (5, 2), (5, 5)],
    // C4 F4 C5 F5 D3 E3 D6 E6
    &[(3, 2), (3, 5), (4, 2), (4, 5), (2, 3), (2, 4), (5, 3), (5, 4)],
    // A3 H3 A6 H6 C1 F1 C8 F8
    &[(2, 0), (2, 7), (5, 0), (5, 7), (0, 2), (0, 5), (7, 2), (7, 5)],
    // A4 H4 A5 H5 D1 E1 D8 E8
    &[(3, 0), (3, 7), (4, 0), (4, 7), (0, 3), (0, 4), (7, 3), (7, 4)],
    // B3 G3 B6 G6 C2 F2 C7 F7
    &[(2, 1), (2, 6), (5, 1), (5, 6), (1, 2), (1, 5), (6, 2), (6, 5)],
    // B4 G4 B5 G5 D2 E2 D7 E7
    &[(3, 1), (3, 6), (4, 1), (4, 6), (1, 3), (1, 4), (6, 3), (6, 4)],
    // B2 G2 B7 G7
    &[(1, 1), (1, 6), (6, 1), (6, 6)],
    // A2 H2 A7 H7 B1 G1 B8 G8
    &[(1, 0), (1, 7), (6, 0), (6, 7), (0, 1), (0, 6), (7, 1), (7, 6)],
];
