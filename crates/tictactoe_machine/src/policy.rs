//! Computer opponent that picks a random empty square.

use crate::types::{Board, Coordinate, Player};
use rand::Rng;
use tracing::{debug, instrument};

/// A move chosen by the computer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputerMove {
    /// Square that received the mark.
    pub at: Coordinate,
    /// Board after the mark was placed.
    pub board: Board,
}

/// Places `mark` on a uniformly random empty square.
///
/// # Panics
///
/// Panics if the board is full. The machine must have reached a draw before
/// the computer is ever asked to move on a full board.
#[instrument(skip(board, rng))]
pub fn random_move<R: Rng + ?Sized>(board: &Board, mark: Player, rng: &mut R) -> ComputerMove {
    let empty = board.empty_cells();
    assert!(!empty.is_empty(), "computer asked to move on a full board");

    let at = empty[rng.random_range(0..empty.len())];
    debug!(row = at.row, col = at.col, choices = empty.len(), "Computer chose square");

    ComputerMove {
        at,
        board: board.place(at, mark),
    }
}
