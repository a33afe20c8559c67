//! States of the game machine.

use crate::types::Player;
use serde::Serialize;

/// Sub-states of `playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayingState {
    /// Waiting for X to move.
    XTurn,
    /// Waiting for O to move, or for the computer in player-vs-computer games.
    OTurn,
    /// The last move is being evaluated.
    Evaluating,
}

/// Sub-states of `gameEnd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameEndState {
    /// The last mover completed at least one line. The lines are in the
    /// context's win result.
    Win,
    /// Board full without a completed line.
    Draw,
}

/// Top-level machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MachineState {
    /// Before start: looking for a stored session.
    CheckResumable,
    /// Waiting for a mode selection and start.
    Idle,
    /// A game is being played.
    Playing(PlayingState),
    /// The game is over; only reset is handled.
    GameEnd(GameEndState),
}

impl MachineState {
    /// The turn state belonging to `player`.
    pub fn turn_of(player: Player) -> Self {
        match player {
            Player::X => MachineState::Playing(PlayingState::XTurn),
            Player::O => MachineState::Playing(PlayingState::OTurn),
        }
    }

    /// Dotted state path, e.g. `playing.xTurn`.
    pub fn path(&self) -> &'static str {
        match self {
            MachineState::CheckResumable => "checkResumable",
            MachineState::Idle => "idle",
            MachineState::Playing(PlayingState::XTurn) => "playing.xTurn",
            MachineState::Playing(PlayingState::OTurn) => "playing.oTurn",
            MachineState::Playing(PlayingState::Evaluating) => "playing.evaluating",
            MachineState::GameEnd(GameEndState::Win) => "gameEnd.win",
            MachineState::GameEnd(GameEndState::Draw) => "gameEnd.draw",
        }
    }

    /// True once the game has ended.
    pub fn is_game_end(&self) -> bool {
        matches!(self, MachineState::GameEnd(_))
    }

    /// True while a player may move.
    pub fn accepts_moves(&self) -> bool {
        matches!(
            self,
            MachineState::Playing(PlayingState::XTurn | PlayingState::OTurn)
        )
    }
}

impl std::fmt::Display for MachineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
