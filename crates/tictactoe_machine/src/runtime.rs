//! Async driver for [`GameMachine`].
//!
//! The runtime task owns the machine. UI events arrive through a
//! [`GameHandle`]; evaluations and the computer's delay run as spawned tasks
//! that report back on an internal channel. A [`Snapshot`] is published on a
//! watch channel after every event.

use crate::machine::{Command, GameEvent, GameMachine, MachineEvent, Snapshot};
use crate::persistence::KeyValueStore;
use crate::rules;
use crate::types::{Coordinate, PlayerMode};
use derive_more::{Display, Error};
use rand::Rng;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Returned when the runtime task is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum RuntimeError {
    /// The runtime has stopped.
    #[display("Game runtime has stopped")]
    Stopped,
}

/// Cloneable handle used by the view layer.
#[derive(Debug, Clone)]
pub struct GameHandle {
    events: mpsc::UnboundedSender<GameEvent>,
    snapshots: watch::Receiver<Snapshot>,
}

impl GameHandle {
    /// Sends a raw event.
    #[instrument(skip(self))]
    pub fn send(&self, event: GameEvent) -> Result<(), RuntimeError> {
        self.events.send(event).map_err(|_| RuntimeError::Stopped)
    }

    /// Sends START_GAME.
    pub fn start_game(&self) -> Result<(), RuntimeError> {
        self.send(GameEvent::StartGame)
    }

    /// Sends SELECT_PLAYER_MODE.
    pub fn select_player_mode(&self, mode: PlayerMode) -> Result<(), RuntimeError> {
        self.send(GameEvent::SelectPlayerMode(mode))
    }

    /// Sends MOVE.
    pub fn make_move(&self, row: usize, col: usize) -> Result<(), RuntimeError> {
        self.send(GameEvent::Move(Coordinate::new(row, col)))
    }

    /// Sends RESET_GAME.
    pub fn reset(&self) -> Result<(), RuntimeError> {
        self.send(GameEvent::ResetGame)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Waits for the next snapshot.
    pub async fn changed(&mut self) -> Result<Snapshot, RuntimeError> {
        self.snapshots
            .changed()
            .await
            .map_err(|_| RuntimeError::Stopped)?;
        Ok(self.snapshots.borrow_and_update().clone())
    }

    /// Waits until a snapshot satisfies `predicate`, checking the current one
    /// first.
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&Snapshot) -> bool,
    ) -> Result<Snapshot, RuntimeError> {
        let snapshot = self
            .snapshots
            .wait_for(predicate)
            .await
            .map_err(|_| RuntimeError::Stopped)?;
        Ok(snapshot.clone())
    }
}

/// Task that owns a [`GameMachine`] and carries out its commands.
pub struct GameRuntime<S, R> {
    machine: GameMachine<S, R>,
    ui_events: mpsc::UnboundedReceiver<GameEvent>,
    internal_tx: mpsc::UnboundedSender<MachineEvent>,
    internal_rx: mpsc::UnboundedReceiver<MachineEvent>,
    snapshots: watch::Sender<Snapshot>,
    pending_computer_move: Option<JoinHandle<()>>,
}

impl<S, R> GameRuntime<S, R>
where
    S: KeyValueStore + 'static,
    R: Rng + Send + 'static,
{
    /// Starts the machine on the current tokio runtime.
    ///
    /// The task stops once every [`GameHandle`] has been dropped.
    #[instrument(skip_all)]
    pub fn spawn(machine: GameMachine<S, R>) -> (GameHandle, JoinHandle<()>) {
        let (events_tx, ui_events) = mpsc::unbounded_channel();
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        let (snapshots, snapshots_rx) = watch::channel(machine.snapshot());

        let runtime = Self {
            machine,
            ui_events,
            internal_tx,
            internal_rx,
            snapshots,
            pending_computer_move: None,
        };
        let task = tokio::spawn(runtime.run());

        let handle = GameHandle {
            events: events_tx,
            snapshots: snapshots_rx,
        };
        (handle, task)
    }

    async fn run(mut self) {
        info!("Game runtime started");
        let commands = self.machine.start();
        self.execute(commands);
        self.publish();

        loop {
            tokio::select! {
                event = self.ui_events.recv() => match event {
                    Some(event) => self.dispatch(event.into()),
                    None => break,
                },
                Some(event) = self.internal_rx.recv() => self.dispatch(event),
            }
        }

        self.cancel_computer_move();
        info!("Game runtime stopped");
    }

    fn dispatch(&mut self, event: MachineEvent) {
        let commands = self.machine.send(event);
        self.execute(commands);
        self.publish();
    }

    fn execute(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Evaluate {
                    generation,
                    board,
                    mover,
                } => {
                    let tx = self.internal_tx.clone();
                    tokio::spawn(async move {
                        let evaluation = rules::evaluate(&board, mover);
                        // The runtime may already be gone; nothing to report to.
                        let _ = tx.send(MachineEvent::EvaluationComplete {
                            generation,
                            evaluation,
                        });
                    });
                }
                Command::ScheduleComputerMove { generation, delay } => {
                    self.cancel_computer_move();
                    let tx = self.internal_tx.clone();
                    self.pending_computer_move = Some(tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = tx.send(MachineEvent::ComputerTurnDue { generation });
                    }));
                }
                Command::CancelComputerMove => self.cancel_computer_move(),
            }
        }
    }

    fn cancel_computer_move(&mut self) {
        if let Some(task) = self.pending_computer_move.take() {
            task.abort();
            debug!("Pending computer move cancelled");
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.machine.snapshot());
    }
}
