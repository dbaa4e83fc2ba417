//! Monte Carlo Tree Search with UCB1 selection.
//!
//! One search call builds a fresh tree of decision points and runs
//! select -> expand -> simulate -> back-propagate cycles until its wall-clock
//! budget runs out, then returns the most-visited root child. Selection
//! tries every unvisited child once before any exploitation, and otherwise
//! maximizes the UCB1 score `w/n + sqrt(2 * ln(N) / n)`, so an early lucky
//! line cannot starve the rest of the tree.
//!
//! Descent and back-propagation are iterative: descent records the path of
//! child indices it took, and the update walks the same path from the root,
//! flipping the score between levels since parent and child represent
//! opposing movers. Positions are evaluated with Roxanne playouts on a
//! private clone of the caller's board.

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use crate::board::{Board, Color, Outcome, Point, str_coord};
use crate::constants::{SAFETY_MARGIN, UCB_EXPLORATION};
use crate::playout::playout;

/// A node in the search tree.
pub struct TreeNode {
    /// Move that led to this node (`None` only for the root)
    pub mv: Option<Point>,
    /// Side to move at this node
    pub color: Color,
    /// Visit count
    pub n: u32,
    /// Accumulated win score (wins count 1, draws 0.5)
    pub w: f64,
    /// Child nodes, one per legal move, in board enumeration order.
    /// Empty for unexpanded nodes and for forced-pass or terminal nodes.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a root node for a position where `color` is to move.
    pub fn new(color: Color) -> Self {
        Self {
            mv: None,
            color,
            n: 0,
            w: 0.0,
            children: Vec::new(),
        }
    }

    fn child(mv: Point, color: Color) -> Self {
        Self {
            mv: Some(mv),
            ..Self::new(color)
        }
    }

    /// Observed winrate, or -0.1 for an unvisited node.
    #[inline]
    pub fn winrate(&self) -> f64 {
        if self.n > 0 {
            self.w / self.n as f64
        } else {
            -0.1
        }
    }
}

/// Expand a node by creating one child per legal move on `board`.
///
/// Children start with zero visits and the opposite side to move. A node
/// whose side has no legal move stays childless: it is a pass (or terminal)
/// position that selection never descends past, only simulates from.
pub fn expand(node: &mut TreeNode, board: &Board) {
    if !node.children.is_empty() {
        return;
    }
    let next = node.color.opponent();
    for mv in board.legal_moves(node.color) {
        node.children.push(TreeNode::child(mv, next));
    }
}

fn ucb(child: &TreeNode, ln_parent: f64) -> f64 {
    let n = child.n as f64;
    child.w / n + (UCB_EXPLORATION * ln_parent / n).sqrt()
}

/// Pick the child to descend into: the first unvisited child if there is
/// one, otherwise the child with the highest UCB1 score.
fn select_child(node: &TreeNode) -> usize {
    if let Some(idx) = node.children.iter().position(|c| c.n == 0) {
        return idx;
    }
    let ln_parent = (node.n as f64).ln();
    node.children
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            ucb(a, ln_parent)
                .partial_cmp(&ucb(b, ln_parent))
                .unwrap_or(Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Descend from the root to a childless node, applying each selected move
/// to the working board along the way.
///
/// Returns the path of child indices taken; the same path drives the
/// back-propagation pass.
fn tree_descend(root: &mut TreeNode, board: &mut Board) -> Vec<usize> {
    let mut path = Vec::new();
    let mut node = root;
    while !node.children.is_empty() {
        let idx = select_child(node);
        let color = node.color;
        if let Some(mv) = node.children[idx].mv {
            board.play(mv, color).expect("tree move rejected by the board");
        }
        path.push(idx);
        node = &mut node.children[idx];
    }
    path
}

/// The node reached by following `path` from `root`.
fn node_at_mut<'a>(root: &'a mut TreeNode, path: &[usize]) -> &'a mut TreeNode {
    path.iter().fold(root, |node, &idx| &mut node.children[idx])
}

/// Propagate a playout result along `path`, incrementing every visit count
/// and adding the score at each level.
///
/// `leaf_score` is the score at the node the path ends in; it flips to
/// `1 - score` between each parent and child, root inclusive.
fn tree_update(root: &mut TreeNode, path: &[usize], leaf_score: f64) {
    let mut score = if path.len() % 2 == 0 {
        leaf_score
    } else {
        1.0 - leaf_score
    };
    let mut node = root;
    node.n += 1;
    node.w += score;
    for &idx in path {
        score = 1.0 - score;
        node = &mut node.children[idx];
        node.n += 1;
        node.w += score;
    }
}

fn outcome_score(outcome: Outcome) -> f64 {
    match outcome {
        Outcome::BlackWin => 1.0,
        Outcome::WhiteWin => 0.0,
        Outcome::Draw => 0.5,
    }
}

/// Run MCTS from `board` with `root.color` to move and return the best move
/// found within `time_limit`.
///
/// The loop keeps a [`SAFETY_MARGIN`] slice of the budget in reserve and
/// only checks the clock between iterations, so the first cycle always
/// completes: even a zero budget yields a legal move when one exists.
/// Returns `None` only when the side to move has no legal move at all.
pub fn tree_search(
    root: &mut TreeNode,
    board: &Board,
    time_limit: Duration,
    rng: &mut fastrand::Rng,
) -> Option<Point> {
    let tick = Instant::now();
    let budget = time_limit.saturating_sub(SAFETY_MARGIN);

    loop {
        let mut sim = board.clone();
        let path = tree_descend(root, &mut sim);

        let leaf_color = {
            let leaf = node_at_mut(root, &path);
            expand(leaf, &sim);
            leaf.color
        };

        let (winner, _margin) = playout(&mut sim, leaf_color, rng);
        let mut score = outcome_score(winner);
        if leaf_color == Color::Black {
            score = 1.0 - score;
        }
        tree_update(root, &path, score);

        if root.children.is_empty() {
            // The root position itself has no legal move: a forced pass.
            return None;
        }
        if tick.elapsed() >= budget {
            break;
        }
    }

    best_move(root)
}

/// The most-visited root child. Visit count is the more robust estimator
/// under partial convergence than raw winrate.
fn best_move(root: &TreeNode) -> Option<Point> {
    root.children.iter().max_by_key(|c| c.n).and_then(|c| c.mv)
}

/// Print per-child visit and winrate statistics to stderr.
pub fn dump_children(root: &TreeNode) {
    for child in &root.children {
        if let Some(mv) = child.mv {
            eprintln!(
                "move {} n={} w={:.1} wr={:.3}",
                str_coord(mv),
                child.n,
                child.w,
                child.winrate()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_creates_one_child_per_legal_move() {
        let board = Board::new();
        let mut root = TreeNode::new(Color::Black);
        expand(&mut root, &board);
        assert_eq!(root.children.len(), 4);
        for child in &root.children {
            assert_eq!(child.color, Color::White);
            assert_eq!(child.n, 0);
            assert!(board.is_legal(child.mv.unwrap(), Color::Black));
        }
    }

    #[test]
    fn test_expand_leaves_pass_node_childless() {
        let board = Board::empty();
        let mut root = TreeNode::new(Color::Black);
        expand(&mut root, &board);
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_select_prefers_unvisited_child() {
        let mut node = TreeNode::new(Color::Black);
        node.n = 7;
        node.children = vec![
            TreeNode::child((0, 0), Color::White),
            TreeNode::child((0, 1), Color::White),
            TreeNode::child((0, 2), Color::White),
        ];
        node.children[0].n = 2;
        node.children[0].w = 2.0;
        node.children[2].n = 5;
        node.children[2].w = 5.0;
        // Index 1 is unvisited and must win over both perfect scorers.
        assert_eq!(select_child(&node), 1);
    }

    #[test]
    fn test_select_maximizes_ucb_when_all_visited() {
        let mut node = TreeNode::new(Color::Black);
        node.n = 20;
        node.children = vec![
            TreeNode::child((0, 0), Color::White),
            TreeNode::child((0, 1), Color::White),
        ];
        node.children[0].n = 10;
        node.children[0].w = 2.0;
        node.children[1].n = 10;
        node.children[1].w = 8.0;
        // Equal visits, so the better winrate decides.
        assert_eq!(select_child(&node), 1);
    }

    #[test]
    fn test_update_alternates_scores() {
        let mut root = TreeNode::new(Color::Black);
        root.children.push(TreeNode::child((2, 3), Color::White));
        root.children[0]
            .children
            .push(TreeNode::child((2, 2), Color::Black));

        tree_update(&mut root, &[0, 0], 1.0);

        assert_eq!(root.n, 1);
        assert_eq!(root.children[0].n, 1);
        assert_eq!(root.children[0].children[0].n, 1);
        // Scores alternate level by level and adjacent levels sum to 1.
        assert_eq!(root.w, 1.0);
        assert_eq!(root.children[0].w, 0.0);
        assert_eq!(root.children[0].children[0].w, 1.0);

        tree_update(&mut root, &[0], 0.5);
        assert_eq!(root.n, 2);
        assert_eq!(root.w, 1.5);
        assert_eq!(root.children[0].w, 0.5);
    }

    #[test]
    fn test_search_visits_every_child_first() {
        let board = Board::new();
        let mut rng = fastrand::Rng::with_seed(3);
        let mut root = TreeNode::new(Color::Black);
        let mv = tree_search(&mut root, &board, Duration::from_millis(1200), &mut rng);

        assert!(board.is_legal(mv.unwrap(), Color::Black));
        assert_eq!(root.children.len(), 4);
        for child in &root.children {
            assert!(child.n >= 1, "unvisited child after search");
        }
        // The first iteration ends at the fresh root; every later one is
        // routed through exactly one root child.
        let routed: u32 = root.children.iter().map(|c| c.n).sum();
        assert_eq!(root.n, routed + 1);
    }

    #[test]
    fn test_search_returns_none_without_moves() {
        let board = Board::empty();
        let mut rng = fastrand::Rng::with_seed(3);
        let mut root = TreeNode::new(Color::White);
        assert_eq!(
            tree_search(&mut root, &board, Duration::from_secs(2), &mut rng),
            None
        );
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_search_single_iteration_still_moves() {
        // A budget below the safety margin leaves zero search time; the
        // one guaranteed cycle must still produce a legal move.
        let board = Board::new();
        let mut rng = fastrand::Rng::with_seed(9);
        let mut root = TreeNode::new(Color::White);
        let mv = tree_search(&mut root, &board, Duration::from_millis(1), &mut rng);
        assert!(board.is_legal(mv.unwrap(), Color::White));
    }
}
