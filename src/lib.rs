//! Gridrace: move selection for a small two-sided race game.
//!
//! Two sides push their pieces across a fixed grid toward the opposing
//! baseline, one orthogonal step per turn. This crate provides the engine
//! that picks the computer side's move by a best-first exploration of every
//! reachable board, along with the board model and game bookkeeping it
//! needs.
//!
//! ## Modules
//!
//! - [`constants`] - Marker values, heuristic weights, standard layout
//! - [`board`] - Board snapshots, coordinates and moves
//! - [`movegen`] - Legal move generation
//! - [`heuristic`] - Move scoring
//! - [`fallback`] - Random legal move selection
//! - [`search`] - The search engine
//! - [`game`] - Sides, move application and end-of-game checks
//! - [`error`] - Board construction errors
//!
//! ## Example
//!
//! ```
//! use gridrace::board::{Board, Move};
//! use gridrace::constants::SIDE_B;
//! use gridrace::search::{Engine, SearchParams};
//!
//! let board = Board::standard();
//! let mut engine = Engine::with_seed(1);
//! let mv = engine.best_move(&board, &SearchParams::new(SIDE_B, 0));
//! assert_eq!(mv, Some(Move::new((6, 1), (5, 1))));
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod fallback;
pub mod game;
pub mod heuristic;
pub mod movegen;
pub mod search;
