//! Errors raised while building a board from outside input.
//!
//! The search itself has no failure paths: illegal moves are filtered at
//! generation time and a blocked side is a normal outcome.

use std::fmt;

/// Reason a grid could not be turned into a [`Board`](crate::board::Board).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// No rows (or no columns) were supplied
    Empty,
    /// A row does not have the same width as the first one
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The declared dimensions do not match the number of cells
    Size {
        rows: usize,
        cols: usize,
        cells: usize,
    },
    /// A character that is not a known marker
    UnknownMarker { ch: char, row: usize, col: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Empty => write!(f, "board has no cells"),
            BoardError::Ragged {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            BoardError::Size { rows, cols, cells } => write!(
                f,
                "{rows}x{cols} board needs {} cells, got {cells}",
                rows * cols
            ),
            BoardError::UnknownMarker { ch, row, col } => {
                write!(f, "unknown marker {ch:?} at row {row} col {col}")
            }
        }
    }
}

impl std::error::Error for BoardError {}
