//! Move scoring.
//!
//! A hypothetical move is scored on the board it produces. The score is the
//! sum of four unclamped terms:
//!
//! - goal distance: `-w × |destination row - goal row|`
//! - mobility: `+w × legal moves available to the acting side`
//! - progress: `-w × Σ |goal row - row|` over all of the acting side's pieces
//! - self block: `-w` once, if the destination touches one of our pieces
//!   that is left with no legal move
//!
//! Higher is better.

use crate::board::{Board, Move};
use crate::constants::{
    EMPTY, Marker, WEIGHT_GOAL_DISTANCE, WEIGHT_MOBILITY, WEIGHT_PROGRESS, WEIGHT_SELF_BLOCK,
};
use crate::movegen::mobility;

/// Multipliers for each heuristic term.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Weights {
    pub goal_distance: i32,
    pub mobility: i32,
    pub progress: i32,
    pub self_block: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            goal_distance: WEIGHT_GOAL_DISTANCE,
            mobility: WEIGHT_MOBILITY,
            progress: WEIGHT_PROGRESS,
            self_block: WEIGHT_SELF_BLOCK,
        }
    }
}

/// Who is moving and where they are heading.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Perspective {
    /// Marker of a free cell
    pub empty: Marker,
    /// Marker of the acting side's pieces
    pub piece: Marker,
    /// Row the acting side is racing towards
    pub goal_row: usize,
}

impl Perspective {
    /// Perspective using the standard empty marker.
    pub fn new(piece: Marker, goal_row: usize) -> Self {
        Self {
            empty: EMPTY,
            piece,
            goal_row,
        }
    }
}

/// The weighted terms of one score, kept apart for inspection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub goal_distance: i32,
    pub mobility: i32,
    pub progress: i32,
    pub self_block: i32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i32 {
        self.goal_distance + self.mobility + self.progress + self.self_block
    }
}

/// Score `mv`, which produced `board`.
pub fn evaluate(board: &Board, mv: Move, who: &Perspective, weights: &Weights) -> i32 {
    breakdown(board, mv, who, weights).total()
}

/// Score `mv` term by term.
pub fn breakdown(board: &Board, mv: Move, who: &Perspective, weights: &Weights) -> ScoreBreakdown {
    let distance = row_distance(mv.to.0, who.goal_row);

    ScoreBreakdown {
        goal_distance: -weights.goal_distance * distance,
        mobility: weights.mobility * total_mobility(board, who.piece, who.empty),
        progress: weights.progress * global_progress(board, who.piece, who.goal_row),
        self_block: if blocks_own_piece(board, mv, who.piece, who.empty) {
            -weights.self_block
        } else {
            0
        },
    }
}

fn row_distance(row: usize, goal_row: usize) -> i32 {
    row.abs_diff(goal_row) as i32
}

/// Sum of legal moves over every piece of the side.
pub fn total_mobility(board: &Board, piece: Marker, empty: Marker) -> i32 {
    board
        .pieces(piece)
        .map(|pt| mobility(board, pt, empty) as i32)
        .sum()
}

/// Negated total row distance of the side to its goal row.
pub fn global_progress(board: &Board, piece: Marker, goal_row: usize) -> i32 {
    -board
        .pieces(piece)
        .map(|(row, _)| row_distance(row, goal_row))
        .sum::<i32>()
}

/// True if the destination of `mv` touches one of our pieces that now has
/// nowhere to go.
pub fn blocks_own_piece(board: &Board, mv: Move, piece: Marker, empty: Marker) -> bool {
    board
        .neighbors(mv.to)
        .any(|n| board.get(n) == Some(piece) && mobility(board, n, empty) == 0)
}
