//! Tic-tac-toe game state machine.
//!
//! # Architecture
//!
//! - **Types**: board, marks, coordinates and player modes
//! - **Rules**: win and draw evaluation reporting every completed line
//! - **Policy**: the computer opponent, a uniformly random empty square
//! - **Persistence**: save, load and clear the in-progress game through a
//!   key-value store
//! - **Machine**: states, guards and transitions
//! - **Runtime**: tokio task that drives the machine and publishes snapshots
//!
//! # Example
//!
//! ```no_run
//! use rand::{SeedableRng, rngs::StdRng};
//! use tictactoe_machine::{
//!     GameConfig, GameMachine, GameRuntime, MemoryStore, PersistenceGateway, PlayerMode,
//! };
//!
//! # async fn example() -> Result<(), tictactoe_machine::RuntimeError> {
//! let config = GameConfig::default();
//! let gateway = PersistenceGateway::with_key(MemoryStore::new(), config.storage_key().clone());
//! let machine = GameMachine::new(gateway, StdRng::seed_from_u64(1), &config);
//! let (mut handle, _task) = GameRuntime::spawn(machine);
//!
//! handle.select_player_mode(PlayerMode::PlayerVsComputer)?;
//! handle.start_game()?;
//! handle.make_move(1, 1)?;
//! let snapshot = handle.wait_for(|s| s.total_moves == 2).await?;
//! println!("{}", snapshot.board.display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod machine;
mod persistence;
mod policy;
mod rules;
mod runtime;
mod types;

// Crate-level exports - Domain types
pub use types::{
    Board, BoardShapeError, Coordinate, DEFAULT_BOARD_SIZE, Player, PlayerMode, Square,
};

// Crate-level exports - Rules
pub use rules::{Evaluation, WinCategory, WinLine, WinResult, check_win, evaluate, is_draw, is_full};

// Crate-level exports - Computer opponent
pub use policy::{ComputerMove, random_move};

// Crate-level exports - Persistence
pub use persistence::{
    DEFAULT_STORAGE_KEY, FileStore, KeyValueStore, MemoryStore, PersistenceError,
    PersistenceErrorKind, PersistenceGateway, Session,
};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, MAX_BOARD_SIZE};

// Crate-level exports - State machine
pub use machine::{
    Command, GameContext, GameEndState, GameEvent, GameMachine, MachineEvent, MachineState,
    PlayingState, Snapshot,
};

// Crate-level exports - Runtime
pub use runtime::{GameHandle, GameRuntime, RuntimeError};
