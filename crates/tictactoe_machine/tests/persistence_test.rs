//! Tests for resuming games across restarts through the file store.

mod common;

use common::{drive, machine_with, settle};
use tictactoe_machine::{
    Coordinate, FileStore, GameEvent, KeyValueStore, MachineState, PersistenceGateway,
    Player, PlayerMode, PlayingState, Square,
};

#[test]
fn test_game_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut machine = machine_with(FileStore::new(dir.path()));
        machine.start();
        drive(&mut machine, GameEvent::SelectPlayerMode(PlayerMode::PlayerVsPlayer));
        drive(&mut machine, GameEvent::StartGame);
        drive(&mut machine, GameEvent::Move(Coordinate::new(0, 0)));
        drive(&mut machine, GameEvent::Move(Coordinate::new(2, 2)));
        drive(&mut machine, GameEvent::Move(Coordinate::new(1, 1)));
        assert_eq!(machine.state(), &MachineState::Playing(PlayingState::OTurn));
    }

    let mut machine = machine_with(FileStore::new(dir.path()));
    let commands = machine.start();
    settle(&mut machine, commands);

    assert_eq!(machine.state(), &MachineState::Playing(PlayingState::OTurn));
    assert!(machine.context().resumed());
    assert_eq!(machine.context().total_moves(), 3);
    assert_eq!(machine.context().player_mode(), Some(PlayerMode::PlayerVsPlayer));
    assert_eq!(
        machine.context().board().get(Coordinate::new(2, 2)),
        Some(Square::Occupied(Player::O))
    );
}

#[test]
fn test_reset_removes_session_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut machine = machine_with(FileStore::new(dir.path()));
    machine.start();
    drive(&mut machine, GameEvent::StartGame);
    drive(&mut machine, GameEvent::Move(Coordinate::new(0, 1)));
    assert!(dir.path().join("currentGame.json").exists());

    drive(&mut machine, GameEvent::ResetGame);
    assert!(!dir.path().join("currentGame.json").exists());

    let mut restarted = machine_with(FileStore::new(dir.path()));
    assert!(restarted.start().is_empty());
    assert_eq!(restarted.state(), &MachineState::Idle);
}

#[test]
fn test_corrupt_session_file_discarded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileStore::new(dir.path());
    store
        .set("currentGame", "{\"board\": 42}".to_string())
        .expect("write");

    let mut machine = machine_with(store.clone());
    assert!(machine.start().is_empty());
    assert_eq!(machine.state(), &MachineState::Idle);
    assert_eq!(store.get("currentGame").expect("read"), None);
}

#[test]
fn test_custom_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut gateway = PersistenceGateway::with_key(FileStore::new(dir.path()), "slot-a");
    assert_eq!(gateway.key(), "slot-a");
    assert_eq!(gateway.load().expect("load"), None);

    let mut machine = machine_with(FileStore::new(dir.path()));
    machine.start();
    drive(&mut machine, GameEvent::StartGame);
    drive(&mut machine, GameEvent::Move(Coordinate::new(1, 1)));

    // The default key was written, the custom one is untouched.
    assert_eq!(gateway.load().expect("load"), None);
    gateway.clear().expect("clearing a missing key succeeds");
    assert!(gateway.store().dir().join("currentGame.json").exists());
}

#[test]
fn test_binary_session_file_discarded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("currentGame.json");
    std::fs::write(&path, [0xff, 0xfe, 0x7b]).expect("write");

    let gateway = PersistenceGateway::new(FileStore::new(dir.path()));
    let err = gateway.load().expect_err("binary data is not a session");
    assert!(err.is_deserialization(), "unexpected error: {}", err);

    let mut machine = machine_with(FileStore::new(dir.path()));
    assert!(machine.start().is_empty());
    assert_eq!(machine.state(), &MachineState::Idle);
    assert!(!path.exists());
}
