//! Data carried by the machine across states.

use super::MachineState;
use crate::persistence::Session;
use crate::rules::WinResult;
use crate::types::{Board, Player, PlayerMode};
use serde::Serialize;

/// Mutable game data owned by the machine.
///
/// `current_player` is the player to move while a turn is open. During
/// evaluation and after the game ends it names the player who moved last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameContext {
    pub(super) board: Board,
    pub(super) current_player: Player,
    pub(super) total_moves: u32,
    pub(super) win_result: Option<WinResult>,
    pub(super) player_mode: Option<PlayerMode>,
    pub(super) resumed: bool,
}

impl GameContext {
    /// Fresh context: empty board, X to move, no mode.
    pub fn new(board_size: usize) -> Self {
        Self {
            board: Board::new(board_size),
            current_player: Player::X,
            total_moves: 0,
            win_result: None,
            player_mode: None,
            resumed: false,
        }
    }

    /// Context adopted from a stored session.
    pub fn from_session(session: Session) -> Self {
        Self {
            board: session.board,
            current_player: session.current_player,
            total_moves: session.total_moves,
            win_result: None,
            player_mode: session.player_mode,
            resumed: true,
        }
    }

    /// The persistable part of the context.
    pub fn to_session(&self) -> Session {
        Session::new(
            self.board.clone(),
            self.current_player,
            self.total_moves,
            self.player_mode,
        )
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current player.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Moves accepted in this game.
    pub fn total_moves(&self) -> u32 {
        self.total_moves
    }

    /// Completed lines once the game is won.
    pub fn win_result(&self) -> Option<&WinResult> {
        self.win_result.as_ref()
    }

    /// Mode chosen before the game started.
    pub fn player_mode(&self) -> Option<PlayerMode> {
        self.player_mode
    }

    /// True if the game was picked up from a stored session.
    pub fn resumed(&self) -> bool {
        self.resumed
    }

    /// True when O is driven by the computer and it is O's turn.
    pub fn computer_to_move(&self) -> bool {
        self.player_mode == Some(PlayerMode::PlayerVsComputer) && self.current_player == Player::O
    }
}

/// Read-only view handed to the view layer after every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Machine state.
    pub state: MachineState,
    /// Board.
    pub board: Board,
    /// See [`GameContext::current_player`].
    pub current_player: Player,
    /// Chosen mode, if any.
    pub player_mode: Option<PlayerMode>,
    /// Completed lines once the game is won.
    pub win_result: Option<WinResult>,
    /// Moves accepted in this game.
    pub total_moves: u32,
    /// True if the game was picked up from a stored session.
    pub resumed: bool,
}

impl Snapshot {
    /// Builds a snapshot of `context` in `state`.
    pub fn capture(state: MachineState, context: &GameContext) -> Self {
        Self {
            state,
            board: context.board.clone(),
            current_player: context.current_player,
            player_mode: context.player_mode,
            win_result: context.win_result.clone(),
            total_moves: context.total_moves,
            resumed: context.resumed,
        }
    }
}
