//! Legal move generation.
//!
//! A piece moves exactly one cell up, down, left or right onto an empty
//! cell. Generation order is fixed (up, down, left, right; pieces in
//! row-major order) because the search breaks ties by insertion order.

use crate::board::{Board, Move, Point};
use crate::constants::Marker;

/// Cells reachable from `pt` in one orthogonal step that hold `empty`.
pub fn destinations(board: &Board, pt: Point, empty: Marker) -> Vec<Point> {
    board
        .neighbors(pt)
        .filter(|&n| board.get(n) == Some(empty))
        .collect()
}

/// Number of one-step moves available to the piece at `pt`.
pub fn mobility(board: &Board, pt: Point, empty: Marker) -> usize {
    board
        .neighbors(pt)
        .filter(|&n| board.get(n) == Some(empty))
        .count()
}

/// Every legal move for the pieces holding `piece`.
pub fn legal_moves(board: &Board, piece: Marker, empty: Marker) -> Vec<Move> {
    board
        .pieces(piece)
        .flat_map(|from| {
            destinations(board, from, empty)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

/// True if at least one piece holding `piece` can move.
pub fn has_legal_move(board: &Board, piece: Marker, empty: Marker) -> bool {
    board.pieces(piece).any(|pt| mobility(board, pt, empty) > 0)
}
