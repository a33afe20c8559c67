//! Draw detection logic for tic-tac-toe.

use super::win::WinResult;
use crate::types::Board;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A full board with no completed line.
///
/// Move counters are deliberately not consulted.
#[instrument(skip_all)]
pub fn is_draw(board: &Board, win: &WinResult) -> bool {
    win.is_empty() && is_full(board)
}
