//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. The state machine runs [`evaluate`] after
//! every accepted move and routes on the result.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WinCategory, WinLine, WinResult, check_win};

use crate::types::{Board, Player};
use serde::Serialize;
use tracing::{debug, instrument};

/// Result of evaluating a board after a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// Every line completed by the mover.
    pub win: WinResult,
    /// Board full and no line completed.
    pub draw: bool,
}

impl Evaluation {
    /// True if at least one line was completed.
    pub fn is_win(&self) -> bool {
        !self.win.is_empty()
    }
}

/// Evaluates `board` from the point of view of the player who just moved.
///
/// Win categories are all checked, never just the first hit, so a move that
/// completes two lines reports both.
#[instrument(skip(board))]
pub fn evaluate(board: &Board, mover: Player) -> Evaluation {
    let win = check_win(board, mover);
    let draw = is_draw(board, &win);
    debug!(lines = win.lines().len(), draw, "Board evaluated");
    Evaluation { win, draw }
}
