//! Events consumed and commands emitted by the machine.

use crate::rules::Evaluation;
use crate::types::{Board, Coordinate, Player, PlayerMode};
use std::time::Duration;

/// Events sent by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Leave `idle` and start playing with X to move.
    StartGame,
    /// Choose the mode while `idle`.
    SelectPlayerMode(PlayerMode),
    /// Place the current player's mark.
    Move(Coordinate),
    /// Abandon everything and return to `idle`.
    ResetGame,
}

/// Everything the machine reacts to.
///
/// The non-UI variants carry the generation they were issued in. They are
/// dropped if a reset happened since.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineEvent {
    /// An event from the view layer.
    Ui(GameEvent),
    /// Result of a [`Command::Evaluate`].
    EvaluationComplete {
        /// Generation the evaluation was requested in.
        generation: u64,
        /// Result of the evaluation.
        evaluation: Evaluation,
    },
    /// The computer's thinking delay has elapsed.
    ComputerTurnDue {
        /// Generation the move was scheduled in.
        generation: u64,
    },
}

impl From<GameEvent> for MachineEvent {
    fn from(event: GameEvent) -> Self {
        MachineEvent::Ui(event)
    }
}

/// Asynchronous work the machine asks its runtime to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Evaluate `board` for `mover` and answer with
    /// [`MachineEvent::EvaluationComplete`].
    Evaluate {
        /// Current generation.
        generation: u64,
        /// Board after the move.
        board: Board,
        /// Player who just moved.
        mover: Player,
    },
    /// Send [`MachineEvent::ComputerTurnDue`] after `delay`.
    ScheduleComputerMove {
        /// Current generation.
        generation: u64,
        /// Thinking delay.
        delay: Duration,
    },
    /// Drop any pending computer move.
    CancelComputerMove,
}
