//! Shared helpers for driving the machine synchronously.

#![allow(dead_code)]

use rand::{SeedableRng, rngs::StdRng};
use std::collections::VecDeque;
use tictactoe_machine::{
    Board, Command, DEFAULT_STORAGE_KEY, GameConfig, GameMachine, KeyValueStore, MachineEvent,
    MemoryStore, PersistenceGateway, Player, PlayerMode, Session, Square, evaluate,
};

/// Machine over `store` with default config and a fixed seed.
pub fn machine_with<S: KeyValueStore>(store: S) -> GameMachine<S, StdRng> {
    GameMachine::new(
        PersistenceGateway::new(store),
        StdRng::seed_from_u64(7),
        &GameConfig::default(),
    )
}

/// Started machine with an empty store.
pub fn started() -> (GameMachine<MemoryStore, StdRng>, MemoryStore) {
    let store = MemoryStore::new();
    let mut machine = machine_with(store.clone());
    let commands = machine.start();
    assert!(commands.is_empty());
    (machine, store)
}

/// Answers every `Evaluate` command inline and returns the others.
pub fn settle<S: KeyValueStore>(
    machine: &mut GameMachine<S, StdRng>,
    commands: Vec<Command>,
) -> Vec<Command> {
    let mut queue: VecDeque<Command> = commands.into();
    let mut deferred = Vec::new();
    while let Some(command) = queue.pop_front() {
        match command {
            Command::Evaluate {
                generation,
                board,
                mover,
            } => {
                let evaluation = evaluate(&board, mover);
                queue.extend(machine.send(MachineEvent::EvaluationComplete {
                    generation,
                    evaluation,
                }));
            }
            other => deferred.push(other),
        }
    }
    deferred
}

/// Sends `event` and settles the resulting evaluations.
pub fn drive<S: KeyValueStore>(
    machine: &mut GameMachine<S, StdRng>,
    event: impl Into<MachineEvent>,
) -> Vec<Command> {
    let commands = machine.send(event);
    settle(machine, commands)
}

/// Builds a 3×3 board from rows like `"X.O"`.
pub fn board_from(layout: [&str; 3]) -> Board {
    let rows = layout
        .iter()
        .map(|row| {
            row.chars()
                .map(|c| match c {
                    'X' => Square::Occupied(Player::X),
                    'O' => Square::Occupied(Player::O),
                    _ => Square::Empty,
                })
                .collect()
        })
        .collect();
    Board::from_rows(rows).expect("valid layout")
}

/// Store holding a session under the default key.
pub fn store_with_session(
    board: Board,
    last_mover: Player,
    mode: Option<PlayerMode>,
) -> MemoryStore {
    let total_moves = board.marks_placed() as u32;
    let session = Session::new(board, last_mover, total_moves, mode);
    let raw = serde_json::to_string(&session).expect("encode session");
    MemoryStore::with_entry(DEFAULT_STORAGE_KEY, raw)
}

/// Session currently stored under the default key.
pub fn stored_session(store: &MemoryStore) -> Option<Session> {
    store
        .get(DEFAULT_STORAGE_KEY)
        .expect("store readable")
        .map(|raw| serde_json::from_str(&raw).expect("stored session decodes"))
}
