//! Legal action generation.
//!
//! Lists the positions at which `Board::action` would currently succeed,
//! for renderers that highlight targets and for random playouts.

use crate::board::{Board, Phase, POSITION_COUNT};

/// Returns every index accepted by `action` in the board's current phase.
pub fn legal_actions(board: &Board) -> Vec<usize> {
    (0..POSITION_COUNT)
        .filter(|&i| is_legal(board, i))
        .collect()
}

/// True if `action(index)` would change `board`.
pub fn is_legal(board: &Board, index: usize) -> bool {
    match board.phase() {
        Phase::PickUp => board.can_pick_up(index),
        Phase::Place => board.can_place(index),
        Phase::RemoveOpponent => board.can_remove(index),
    }
}
