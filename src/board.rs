//! Board snapshots, coordinates and moves.
//!
//! A [`Board`] is a flat row-major vector of markers. Boards derive a total
//! order and a hash over their contents so that snapshots can serve directly
//! as visited-set keys and as tie-breakers in the search frontier.

use std::fmt;
use std::str::FromStr;

use crate::constants::{
    COLS, DIRECTIONS, EMPTY, INITIAL_LAYOUT, Marker, OBSTACLE, ROWS, SIDE_A, SIDE_B,
};
use crate::error::BoardError;

/// A cell coordinate as `(row, col)`.
pub type Point = (usize, usize);

/// A single orthogonal step of one piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub from: Point,
    pub to: Point,
}

impl Move {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Manhattan distance between source and destination.
    pub fn distance(&self) -> usize {
        self.from.0.abs_diff(self.to.0) + self.from.1.abs_diff(self.to.1)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fr, fc) = self.from;
        let (tr, tc) = self.to;
        write!(f, "{fr},{fc} -> {tr},{tc}")
    }
}

/// A rectangular grid of cell markers.
///
/// `cells` is declared first so the derived ordering compares contents
/// row-major before looking at the dimensions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board {
    cells: Vec<Marker>,
    rows: usize,
    cols: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// A board with every cell set to `marker`.
    pub fn filled(rows: usize, cols: usize, marker: Marker) -> Self {
        Self {
            cells: vec![marker; rows * cols],
            rows,
            cols,
        }
    }

    /// The standard 7x3 opening position.
    pub fn standard() -> Self {
        Self {
            cells: INITIAL_LAYOUT.iter().flatten().copied().collect(),
            rows: ROWS,
            cols: COLS,
        }
    }

    /// Build a board from a row-major cell vector.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Marker>) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::Empty);
        }
        if cells.len() != rows * cols {
            return Err(BoardError::Size {
                rows,
                cols,
                cells: cells.len(),
            });
        }
        Ok(Self { cells, rows, cols })
    }

    /// Build a board from nested rows. Every row must have the same width.
    pub fn from_rows<R: AsRef<[Marker]>>(grid: &[R]) -> Result<Self, BoardError> {
        let cols = grid.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(grid.len() * cols);
        for (row, r) in grid.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != cols {
                return Err(BoardError::Ragged {
                    row,
                    expected: cols,
                    found: r.len(),
                });
            }
            cells.extend_from_slice(r);
        }
        Self::from_cells(grid.len(), cols, cells)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Marker] {
        &self.cells
    }

    fn idx(&self, (row, col): Point) -> usize {
        row * self.cols + col
    }

    pub fn in_bounds(&self, (row, col): Point) -> bool {
        row < self.rows && col < self.cols
    }

    /// Marker at `pt`, or `None` when off the board.
    pub fn get(&self, pt: Point) -> Option<Marker> {
        if !self.in_bounds(pt) {
            return None;
        }
        Some(self.cells[self.idx(pt)])
    }

    /// Overwrite one cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, pt: Point, marker: Marker) {
        if self.in_bounds(pt) {
            let i = self.idx(pt);
            self.cells[i] = marker;
        }
    }

    /// In-bounds orthogonal neighbors in up, down, left, right order.
    pub fn neighbors(&self, (row, col): Point) -> impl Iterator<Item = Point> + '_ {
        DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            self.in_bounds((r, c)).then_some((r, c))
        })
    }

    /// Every cell holding `marker`, in row-major order.
    pub fn pieces(&self, marker: Marker) -> impl Iterator<Item = Point> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &m)| m == marker)
            .map(move |(i, _)| (i / cols, i % cols))
    }

    pub fn count(&self, marker: Marker) -> usize {
        self.cells.iter().filter(|&&m| m == marker).count()
    }

    /// True if every cell of `row` holds `marker`.
    pub fn row_is_all(&self, row: usize, marker: Marker) -> bool {
        row < self.rows && (0..self.cols).all(|col| self.get((row, col)) == Some(marker))
    }

    /// Snapshot after moving `piece` along `mv`.
    ///
    /// The destination must hold `empty`; otherwise the copy is returned
    /// unchanged. `self` is never modified.
    pub fn with_move(&self, mv: Move, piece: Marker, empty: Marker) -> Board {
        let mut next = self.clone();
        if self.get(mv.to) == Some(empty) && self.in_bounds(mv.from) {
            next.set(mv.to, piece);
            next.set(mv.from, empty);
        }
        next
    }
}

/// Character used to draw a marker.
pub fn marker_char(marker: Marker) -> char {
    match marker {
        OBSTACLE => '#',
        EMPTY => '.',
        SIDE_A => 'A',
        SIDE_B => 'B',
        _ => '?',
    }
}

/// Marker for a board character. Digits 0-3 map to the raw marker values.
pub fn char_marker(ch: char) -> Option<Marker> {
    match ch {
        '#' | '0' => Some(OBSTACLE),
        '.' | '1' => Some(EMPTY),
        'A' | 'a' | '2' => Some(SIDE_A),
        'B' | 'b' | '3' => Some(SIDE_B),
        _ => None,
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse one row per line. Whitespace between cells and blank lines are
    /// ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid: Vec<Vec<Marker>> = Vec::new();
        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = grid.len();
            let mut cells = Vec::new();
            for (col, ch) in line.chars().filter(|c| !c.is_whitespace()).enumerate() {
                let marker = char_marker(ch).ok_or(BoardError::UnknownMarker { ch, row, col })?;
                cells.push(marker);
            }
            grid.push(cells);
        }
        Board::from_rows(&grid)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let ch = marker_char(self.cells[self.idx((row, col))]);
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
