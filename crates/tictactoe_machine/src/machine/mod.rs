//! Hierarchical game state machine.
//!
//! ```text
//! checkResumable ──► idle ──START_GAME──► playing.xTurn ◄──┐
//!        │                                     │ MOVE       │
//!        │                                     ▼            │
//!        └──────────(session found)──► playing.evaluating ──┤
//!                                              │            │
//!                                              ▼            │
//!                                gameEnd.win / gameEnd.draw │
//!                                                playing.oTurn
//! ```
//!
//! RESET_GAME is accepted everywhere and returns to `idle`.

mod context;
mod event;
mod state;
mod transition;

pub use context::{GameContext, Snapshot};
pub use event::{Command, GameEvent, MachineEvent};
pub use state::{GameEndState, MachineState, PlayingState};
pub use transition::GameMachine;
