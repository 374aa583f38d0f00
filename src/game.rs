//! Game bookkeeping around the engine: sides, move application and the
//! end-of-game checks.

use std::fmt;

use log::info;

use crate::board::{Board, Move, Point};
use crate::constants::{EMPTY, Marker, SIDE_A, SIDE_B};
use crate::movegen::has_legal_move;
use crate::search::{Engine, SearchParams, SearchResult};

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Starts on row 0, wins by filling the last row
    A,
    /// Starts on the last row, wins by filling row 0
    B,
}

impl Side {
    pub fn marker(self) -> Marker {
        match self {
            Side::A => SIDE_A,
            Side::B => SIDE_B,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Row this side has to fill on a board with `rows` rows.
    pub fn goal_row(self, rows: usize) -> usize {
        match self {
            Side::A => rows.saturating_sub(1),
            Side::B => 0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// State of the game as seen before `to_move` plays.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// The side filled its goal row
    Won(Side),
    /// The side to move cannot move; the game is drawn
    Blocked(Side),
}

/// A game in progress.
#[derive(Clone, Debug, Default)]
pub struct Game {
    board: Board,
}

impl Game {
    /// A game from the standard opening position.
    pub fn new() -> Self {
        Self::from_board(Board::standard())
    }

    pub fn from_board(board: Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// True if the piece on `from` may step onto `to`.
    pub fn is_valid_move(&self, from: Point, to: Point) -> bool {
        let piece = self.board.get(from);
        piece.is_some_and(|m| m == SIDE_A || m == SIDE_B)
            && self.board.get(to) == Some(EMPTY)
            && Move::new(from, to).distance() == 1
    }

    /// Apply a move if it is valid. Returns whether it was applied.
    pub fn move_piece(&mut self, from: Point, to: Point) -> bool {
        if !self.is_valid_move(from, to) {
            return false;
        }
        if let Some(piece) = self.board.get(from) {
            self.board = self.board.with_move(Move::new(from, to), piece, EMPTY);
        }
        true
    }

    /// Win and block checks. Wins are tested for side A first.
    pub fn status(&self, to_move: Side) -> GameStatus {
        for side in [Side::A, Side::B] {
            if self.board.row_is_all(side.goal_row(self.board.rows()), side.marker()) {
                return GameStatus::Won(side);
            }
        }
        if !has_legal_move(&self.board, to_move.marker(), EMPTY) {
            return GameStatus::Blocked(to_move);
        }
        GameStatus::InProgress
    }

    /// Let the engine play one move for `side`.
    ///
    /// Returns the move played, or `None` if the side is blocked.
    pub fn engine_turn(&mut self, engine: &mut Engine, side: Side) -> Option<Move> {
        self.engine_turn_with_stats(engine, side).0
    }

    /// Like [`Game::engine_turn`], also returning the search counters.
    ///
    /// The move is `Some` only if it was applied to the board.
    pub fn engine_turn_with_stats(
        &mut self,
        engine: &mut Engine,
        side: Side,
    ) -> (Option<Move>, SearchResult) {
        let params = SearchParams::new(side.marker(), side.goal_row(self.board.rows()));
        let result = engine.search(&self.board, &params);
        let played = result
            .best_move()
            .filter(|mv| self.move_piece(mv.from, mv.to));
        if let Some(mv) = played {
            info!("side {side} played {mv}");
        }
        (played, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Outcome;

    #[test]
    fn test_goal_rows() {
        assert_eq!(Side::A.goal_row(7), 6);
        assert_eq!(Side::B.goal_row(7), 0);
        assert_eq!(Side::A.opponent(), Side::B);
    }

    #[test]
    fn test_move_validation() {
        let mut game = Game::new();
        // Obstacle, too far, not a piece, diagonal
        assert!(!game.is_valid_move((0, 0), (1, 0)));
        assert!(!game.is_valid_move((0, 1), (2, 1)));
        assert!(!game.is_valid_move((1, 1), (2, 1)));
        assert!(!game.is_valid_move((0, 0), (1, 1)));
        assert!(!game.is_valid_move((6, 1), (7, 1)));

        assert!(game.move_piece((0, 1), (1, 1)));
        assert_eq!(game.board().get((1, 1)), Some(SIDE_A));
        assert_eq!(game.board().get((0, 1)), Some(EMPTY));
        assert!(!game.move_piece((0, 1), (1, 1)));
    }

    #[test]
    fn test_status() {
        assert_eq!(Game::new().status(Side::A), GameStatus::InProgress);

        let won: Board = ". . .\n# . #\nB B B\nA A A".parse().unwrap();
        assert_eq!(Game::from_board(won).status(Side::B), GameStatus::Won(Side::A));

        let won: Board = "B B B\n. . .\nA . .".parse().unwrap();
        assert_eq!(Game::from_board(won).status(Side::A), GameStatus::Won(Side::B));

        let stuck: Board = "A A A\n# # #\nB B B".parse().unwrap();
        assert_eq!(
            Game::from_board(stuck).status(Side::B),
            GameStatus::Blocked(Side::B)
        );
    }

    #[test]
    fn test_engine_turn() {
        let mut game = Game::new();
        let mut engine = Engine::with_seed(1);
        let mv = game.engine_turn(&mut engine, Side::B);
        assert_eq!(mv, Some(Move::new((6, 1), (5, 1))));
        assert_eq!(game.board().get((5, 1)), Some(SIDE_B));

        let mut stuck = Game::from_board("A A A\n# # #\nB B B".parse().unwrap());
        assert_eq!(stuck.engine_turn(&mut engine, Side::B), None);
    }

    #[test]
    fn test_engine_turn_with_stats_applies_move() {
        let mut game = Game::new();
        let mut engine = Engine::with_seed(1);

        let (played, result) = game.engine_turn_with_stats(&mut engine, Side::A);
        assert_eq!(played, Some(Move::new((0, 1), (1, 1))));
        assert_eq!(played, result.best_move());
        assert!(result.expanded > 1);
        assert_eq!(game.board().get((1, 1)), Some(SIDE_A));
        assert_eq!(game.board().get((0, 1)), Some(EMPTY));

        let mut stuck = Game::from_board("A A A\n# # #\nB B B".parse().unwrap());
        let before = stuck.board().clone();
        let (played, result) = stuck.engine_turn_with_stats(&mut engine, Side::B);
        assert_eq!(played, None);
        assert_eq!(result.outcome, Outcome::Blocked);
        assert_eq!(stuck.board(), &before);
    }
}
