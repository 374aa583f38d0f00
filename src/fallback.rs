//! Random move selection for when the search has nothing to offer.

use crate::board::{Board, Move};
use crate::constants::Marker;
use crate::movegen::legal_moves;

/// Pick one legal move for `piece` uniformly at random.
///
/// Returns `None` when the side has no legal move at all.
pub fn random_legal_move(
    rng: &mut fastrand::Rng,
    board: &Board,
    piece: Marker,
    empty: Marker,
) -> Option<Move> {
    let moves = legal_moves(board, piece, empty);
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}
