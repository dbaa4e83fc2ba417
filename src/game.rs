//! Interactive match orchestration.
//!
//! The game loop owns the authoritative board and alternates turns between
//! two [`Player`]s, handling passes, per-move timing statistics, and the
//! forfeit rules: a side loses outright after three illegal move attempts
//! in one turn or after thinking longer than the move timeout. Players only
//! ever see `&Board`, so the search layers cannot touch the authoritative
//! state; they work on their own clones.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::board::{Board, Color, Outcome, Point, str_coord};
use crate::constants::{MAX_MOVE_ATTEMPTS, MOVE_TIMEOUT};
use crate::players::{Player, PlayerMove};

/// What a turn resolved to after validation.
enum Decision {
    Move(Point),
    Pass,
    Quit,
}

/// A match between two players over one board.
pub struct Game {
    board: Board,
    black: Box<dyn Player>,
    white: Box<dyn Player>,
    step_time: [Duration; 2],
    total_time: [Duration; 2],
}

impl Game {
    /// Start a match from the standard opening position.
    pub fn new(black: Box<dyn Player>, white: Box<dyn Player>) -> Self {
        Self::with_board(Board::new(), black, white)
    }

    /// Start a match from a prepared position.
    pub fn with_board(board: Board, black: Box<dyn Player>, white: Box<dyn Player>) -> Self {
        debug_assert_eq!(black.color(), Color::Black);
        debug_assert_eq!(white.color(), Color::White);
        Self {
            board,
            black,
            white,
            step_time: [Duration::ZERO; 2],
            total_time: [Duration::ZERO; 2],
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn idx(color: Color) -> usize {
        match color {
            Color::Black => 0,
            Color::White => 1,
        }
    }

    /// Render the board with stone counts and thinking-time statistics.
    fn display(&self) {
        println!("{}", self.board);
        for color in [Color::Black, Color::White] {
            let i = Self::idx(color);
            println!(
                "{} ({}): {} discs / {:.1}s this move / {:.1}s total",
                color,
                color.disc(),
                self.board.count(color),
                self.step_time[i].as_secs_f64(),
                self.total_time[i].as_secs_f64(),
            );
        }
        println!();
    }

    /// `loser` broke the match rules; the opponent wins with margin 0.
    fn force_loss(&self, loser: Color, reason: &str) -> (Outcome, u32) {
        println!("{loser} {reason}, {} wins", loser.opponent());
        match loser {
            Color::Black => (Outcome::WhiteWin, 0),
            Color::White => (Outcome::BlackWin, 0),
        }
    }

    /// Ask `player` for a move, re-prompting on illegal squares up to the
    /// attempt limit. `None` means the attempts ran out.
    fn take_turn(
        board: &Board,
        player: &mut dyn Player,
        to_move: Color,
    ) -> Result<Option<Decision>> {
        for _ in 0..MAX_MOVE_ATTEMPTS {
            match player.get_move(board)? {
                Some(PlayerMove::Quit) => return Ok(Some(Decision::Quit)),
                Some(PlayerMove::Place(mv)) => {
                    if board.is_legal(mv, to_move) {
                        return Ok(Some(Decision::Move(mv)));
                    }
                    println!(
                        "{} is not a legal move for {to_move}, try again",
                        str_coord(mv)
                    );
                }
                None => return Ok(Some(Decision::Pass)),
            }
        }
        Ok(None)
    }

    /// Run the match to its end and return the result.
    pub fn run(&mut self) -> Result<(Outcome, u32)> {
        println!("===== game start =====\n");
        self.display();

        let mut to_move = Color::Black;
        let result = loop {
            if !self.board.has_legal_move(to_move) {
                if self.board.is_terminal() {
                    break self.board.score();
                }
                println!("{to_move} has no legal move and passes\n");
                to_move = to_move.opponent();
                continue;
            }

            let player: &mut dyn Player = match to_move {
                Color::Black => self.black.as_mut(),
                Color::White => self.white.as_mut(),
            };
            let start = Instant::now();
            let decision = Self::take_turn(&self.board, player, to_move)?;
            let elapsed = start.elapsed();

            match decision {
                Some(Decision::Quit) => {
                    println!("{to_move} quits, scoring the board as it stands\n");
                    break self.board.score();
                }
                Some(Decision::Pass) => {
                    to_move = to_move.opponent();
                }
                Some(Decision::Move(mv)) => {
                    if elapsed > MOVE_TIMEOUT {
                        break self.force_loss(to_move, "took too long over a move");
                    }
                    self.board
                        .play(mv, to_move)
                        .expect("validated move rejected by the board");
                    let i = Self::idx(to_move);
                    self.step_time[i] = elapsed;
                    self.total_time[i] += elapsed;

                    println!("{to_move} plays {}\n", str_coord(mv));
                    self.display();

                    if self.board.is_terminal() {
                        break self.board.score();
                    }
                    to_move = to_move.opponent();
                }
                None => {
                    break self.force_loss(to_move, "made 3 illegal move attempts");
                }
            }
        };

        println!("===== game over =====\n");
        self.display();
        match result {
            (Outcome::BlackWin, margin) => println!("Black wins by {margin}"),
            (Outcome::WhiteWin, margin) => println!("White wins by {margin}"),
            (Outcome::Draw, _) => println!("Draw"),
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plays a fixed script of decisions, then passes forever.
    struct Scripted {
        color: Color,
        moves: Vec<PlayerMove>,
        at: usize,
    }

    impl Scripted {
        fn new(color: Color, moves: Vec<PlayerMove>) -> Box<Self> {
            Box::new(Self {
                color,
                moves,
                at: 0,
            })
        }
    }

    impl Player for Scripted {
        fn color(&self) -> Color {
            self.color
        }

        fn get_move(&mut self, _board: &Board) -> Result<Option<PlayerMove>> {
            let mv = self.moves.get(self.at).copied();
            self.at += 1;
            Ok(mv)
        }
    }

    #[test]
    fn test_moveless_side_passes_and_game_finishes() {
        // Black A1, White B1: White can never move, Black captures at C1
        // and the game ends 3-0.
        let mut board = Board::empty();
        board.set((0, 0), Some(Color::Black));
        board.set((0, 1), Some(Color::White));

        let black = Scripted::new(Color::Black, vec![PlayerMove::Place((0, 2))]);
        let white = Scripted::new(Color::White, vec![]);
        let mut game = Game::with_board(board, black, white);

        let result = game.run().unwrap();
        assert_eq!(result, (Outcome::BlackWin, 3));
        assert_eq!(game.board().count(Color::White), 0);
    }

    #[test]
    fn test_three_illegal_attempts_forfeit() {
        let corner = PlayerMove::Place((7, 7));
        let black = Scripted::new(Color::Black, vec![corner, corner, corner]);
        let white = Scripted::new(Color::White, vec![]);
        let mut game = Game::new(black, white);

        let result = game.run().unwrap();
        assert_eq!(result, (Outcome::WhiteWin, 0));
    }

    #[test]
    fn test_one_bad_attempt_is_forgiven() {
        let black = Scripted::new(
            Color::Black,
            vec![PlayerMove::Place((7, 7)), PlayerMove::Place((2, 3)), PlayerMove::Quit],
        );
        let white = Scripted::new(Color::White, vec![PlayerMove::Quit]);
        let mut game = Game::new(black, white);

        // Black fumbles once, then plays D3 legally; White quits, and the
        // 4-1 board goes to Black.
        let result = game.run().unwrap();
        assert_eq!(result, (Outcome::BlackWin, 3));
    }

    #[test]
    fn test_quit_scores_board_as_it_stands() {
        let black = Scripted::new(Color::Black, vec![PlayerMove::Quit]);
        let white = Scripted::new(Color::White, vec![]);
        let mut game = Game::new(black, white);

        // Opening position is 2-2.
        let result = game.run().unwrap();
        assert_eq!(result, (Outcome::Draw, 0));
    }
}
