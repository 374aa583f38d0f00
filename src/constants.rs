//! Marker values, heuristic weights and the standard opening layout.
//!
//! Markers are plain bytes so that callers holding a raw integer grid can
//! hand it to the engine without translation.

// =============================================================================
// Cell Markers
// =============================================================================

/// A cell marker. Any byte is accepted by the engine; the constants below
/// are the values used by the standard game.
pub type Marker = u8;

/// Impassable cell, never a move target.
pub const OBSTACLE: Marker = 0;

/// Free cell, the only valid move target.
pub const EMPTY: Marker = 1;

/// Side A piece (the human side). Starts on row 0 and races to the last row.
pub const SIDE_A: Marker = 2;

/// Side B piece (the computer side). Starts on the last row and races to row 0.
pub const SIDE_B: Marker = 3;

// =============================================================================
// Heuristic Weights
// =============================================================================

/// Penalty per row between the moved piece and the goal row.
pub const WEIGHT_GOAL_DISTANCE: i32 = 10;

/// Bonus per legal move available to the acting side after the move.
pub const WEIGHT_MOBILITY: i32 = 30;

/// Bonus per row of total advancement of the acting side.
pub const WEIGHT_PROGRESS: i32 = 15;

/// Flat penalty for parking next to a piece of our own that is left stuck.
pub const WEIGHT_SELF_BLOCK: i32 = 50;

// =============================================================================
// Board Geometry
// =============================================================================

/// Rows of the standard board.
pub const ROWS: usize = 7;

/// Columns of the standard board.
pub const COLS: usize = 3;

/// Orthogonal step offsets as (row, col) deltas.
/// Order: up, down, left, right. Tie-breaking downstream depends on it.
pub const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The standard opening position, row 0 first.
pub const INITIAL_LAYOUT: [[Marker; COLS]; ROWS] = [
    [SIDE_A, SIDE_A, SIDE_A],
    [OBSTACLE, EMPTY, OBSTACLE],
    [EMPTY, EMPTY, OBSTACLE],
    [OBSTACLE, EMPTY, OBSTACLE],
    [OBSTACLE, EMPTY, EMPTY],
    [OBSTACLE, EMPTY, OBSTACLE],
    [SIDE_B, SIDE_B, SIDE_B],
];

/// Default number of turns for a self-play session.
pub const SELFPLAY_TURNS: usize = 60;
