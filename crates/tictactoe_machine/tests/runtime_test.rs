//! Tests for the async runtime driving the machine.

mod common;

use common::{board_from, machine_with, store_with_session, stored_session};
use std::time::Duration;
use tictactoe_machine::{
    GameEndState, GameRuntime, MachineState, MemoryStore, Player, PlayerMode, PlayingState,
    RuntimeError,
};

const X_TURN: MachineState = MachineState::Playing(PlayingState::XTurn);
const O_TURN: MachineState = MachineState::Playing(PlayingState::OTurn);

#[tokio::test(start_paused = true)]
async fn test_player_vs_player_turns() {
    let (mut handle, _task) = GameRuntime::spawn(machine_with(MemoryStore::new()));
    handle
        .wait_for(|s| s.state == MachineState::Idle)
        .await
        .expect("idle");

    handle.start_game().expect("send");
    handle.make_move(0, 0).expect("send");
    let snapshot = handle.wait_for(|s| s.state == O_TURN).await.expect("o turn");
    assert_eq!(snapshot.current_player, Player::O);
    assert_eq!(snapshot.total_moves, 1);

    handle.make_move(1, 1).expect("send");
    let snapshot = handle
        .wait_for(|s| s.state == X_TURN && s.total_moves == 2)
        .await
        .expect("x turn");
    assert_eq!(snapshot.board.marks_placed(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_computer_replies_after_delay() {
    let (mut handle, _task) = GameRuntime::spawn(machine_with(MemoryStore::new()));
    handle.select_player_mode(PlayerMode::PlayerVsComputer).expect("send");
    handle.start_game().expect("send");
    handle.make_move(1, 1).expect("send");

    let started = tokio::time::Instant::now();
    handle.wait_for(|s| s.state == O_TURN).await.expect("computer turn");

    let snapshot = handle
        .wait_for(|s| s.state == X_TURN && s.total_moves == 2)
        .await
        .expect("computer moved");
    assert!(started.elapsed() >= Duration::from_millis(500));
    assert_eq!(snapshot.player_mode, Some(PlayerMode::PlayerVsComputer));
    assert_eq!(snapshot.board.empty_cells().len(), 7);
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_pending_computer_move() {
    let store = MemoryStore::new();
    let (mut handle, _task) = GameRuntime::spawn(machine_with(store.clone()));
    handle.select_player_mode(PlayerMode::PlayerVsComputer).expect("send");
    handle.start_game().expect("send");
    handle.make_move(0, 0).expect("send");
    handle.wait_for(|s| s.state == O_TURN).await.expect("computer turn");

    handle.reset().expect("send");
    handle
        .wait_for(|s| s.state == MachineState::Idle)
        .await
        .expect("idle");

    tokio::time::sleep(Duration::from_secs(2)).await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.state, MachineState::Idle);
    assert_eq!(snapshot.total_moves, 0);
    assert_eq!(snapshot.board.marks_placed(), 0);
    assert_eq!(snapshot.player_mode, None);
    assert_eq!(stored_session(&store), None);
}

#[tokio::test(start_paused = true)]
async fn test_resumed_game_published() {
    let board = board_from(["XXX", "OO.", "..."]);
    let store = store_with_session(board, Player::X, Some(PlayerMode::PlayerVsPlayer));
    let (mut handle, _task) = GameRuntime::spawn(machine_with(store));

    let snapshot = handle
        .wait_for(|s| s.state.is_game_end())
        .await
        .expect("game end");
    assert_eq!(snapshot.state, MachineState::GameEnd(GameEndState::Win));
    assert!(snapshot.resumed);
    assert!(snapshot.win_result.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_runtime_stops_when_handles_dropped() {
    let (mut handle, task) = GameRuntime::spawn(machine_with(MemoryStore::new()));
    let sender = handle.clone();
    sender.start_game().expect("runtime alive");
    handle.wait_for(|s| s.state == X_TURN).await.expect("started");

    drop(sender);
    drop(handle);
    task.await.expect("runtime exits cleanly");
}

#[tokio::test(start_paused = true)]
async fn test_handle_reports_stopped_runtime() {
    let (mut handle, task) = GameRuntime::spawn(machine_with(MemoryStore::new()));
    handle
        .wait_for(|s| s.state == MachineState::Idle)
        .await
        .expect("idle");

    task.abort();
    let _ = task.await;
    assert_eq!(handle.start_game(), Err(RuntimeError::Stopped));
    assert_eq!(handle.changed().await, Err(RuntimeError::Stopped));
}
