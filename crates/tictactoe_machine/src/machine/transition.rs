//! Transition logic of the game machine.

use super::{
    Command, GameContext, GameEndState, GameEvent, MachineEvent, MachineState, PlayingState,
    Snapshot,
};
use crate::config::GameConfig;
use crate::persistence::{KeyValueStore, PersistenceGateway};
use crate::policy;
use crate::rules::Evaluation;
use crate::types::{Board, Coordinate, Player, PlayerMode};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// The game state machine.
///
/// Handles one event at a time and returns the [`Command`]s the caller must
/// carry out. Persistence is done inline; evaluation and the computer's delay
/// are left to the caller, which feeds their results back as
/// [`MachineEvent`]s.
#[derive(Debug)]
pub struct GameMachine<S, R> {
    state: MachineState,
    context: GameContext,
    gateway: PersistenceGateway<S>,
    rng: R,
    generation: u64,
    board_size: usize,
    computer_delay: Duration,
}

impl<S: KeyValueStore, R: Rng> GameMachine<S, R> {
    /// Creates a machine in `checkResumable`. Call [`GameMachine::start`] next.
    #[instrument(skip(gateway, rng), fields(key = gateway.key()))]
    pub fn new(gateway: PersistenceGateway<S>, rng: R, config: &GameConfig) -> Self {
        Self {
            state: MachineState::CheckResumable,
            context: GameContext::new(*config.board_size()),
            gateway,
            rng,
            generation: 0,
            board_size: *config.board_size(),
            computer_delay: config.computer_delay(),
        }
    }

    /// Runs `checkResumable`: adopts a stored session or settles in `idle`.
    ///
    /// A resumed game is re-evaluated so a finished game shows as finished.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Vec<Command> {
        if self.state != MachineState::CheckResumable {
            warn!(state = %self.state, "Machine already started");
            return Vec::new();
        }

        match self.gateway.load() {
            Ok(Some(session)) if session.board.marks_placed() > 0 => {
                info!(
                    total_moves = session.total_moves,
                    last_mover = %session.current_player,
                    "Resuming stored game"
                );
                let mover = session.current_player;
                self.context = GameContext::from_session(session);
                self.enter_evaluating(mover)
            }
            Ok(Some(_)) => {
                debug!("Stored session has no moves, starting fresh");
                self.discard_session();
                self.state = MachineState::Idle;
                Vec::new()
            }
            Ok(None) => {
                debug!("No stored game");
                self.state = MachineState::Idle;
                Vec::new()
            }
            Err(e) if e.is_deserialization() => {
                warn!(error = %e, "Discarding corrupt stored game");
                self.discard_session();
                self.state = MachineState::Idle;
                Vec::new()
            }
            Err(e) => {
                // The stored game may be intact, so it is left in place.
                warn!(error = %e, "Could not read stored game, starting fresh");
                self.state = MachineState::Idle;
                Vec::new()
            }
        }
    }

    /// Processes one event.
    ///
    /// Events the current state has no handler for are ignored.
    #[instrument(skip(self, event), fields(state = %self.state, generation = self.generation))]
    pub fn send(&mut self, event: impl Into<MachineEvent>) -> Vec<Command> {
        let event = event.into();
        let commands = match (self.state, event) {
            (_, MachineEvent::Ui(GameEvent::ResetGame)) => self.reset(),
            (MachineState::Idle, MachineEvent::Ui(GameEvent::SelectPlayerMode(mode))) => {
                self.select_mode(mode);
                Vec::new()
            }
            (MachineState::Idle, MachineEvent::Ui(GameEvent::StartGame)) => {
                info!(mode = ?self.context.player_mode, "Game started");
                self.enter_turn(Player::X)
            }
            (
                MachineState::Playing(PlayingState::XTurn | PlayingState::OTurn),
                MachineEvent::Ui(GameEvent::Move(at)),
            ) => self.player_move(at),
            (
                MachineState::Playing(PlayingState::Evaluating),
                MachineEvent::EvaluationComplete {
                    generation,
                    evaluation,
                },
            ) if generation == self.generation => self.finish_evaluation(evaluation),
            (
                MachineState::Playing(PlayingState::OTurn),
                MachineEvent::ComputerTurnDue { generation },
            ) if generation == self.generation && self.context.computer_to_move() => {
                self.computer_move()
            }
            (state, event) => {
                debug!(state = %state, ?event, "Event ignored");
                Vec::new()
            }
        };

        debug!(state = %self.state, "Transition complete");
        commands
    }

    /// Current state.
    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Current context.
    pub fn context(&self) -> &GameContext {
        &self.context
    }

    /// Counter bumped by every reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Persistence gateway in use.
    pub fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }

    /// Read-only view of state and context.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.state, &self.context)
    }

    fn select_mode(&mut self, mode: PlayerMode) {
        debug!(%mode, "Player mode selected");
        self.context.player_mode = Some(mode);
    }

    fn enter_turn(&mut self, player: Player) -> Vec<Command> {
        self.context.current_player = player;
        self.state = MachineState::turn_of(player);

        if self.context.computer_to_move() {
            debug!(delay = ?self.computer_delay, "Scheduling computer move");
            vec![Command::ScheduleComputerMove {
                generation: self.generation,
                delay: self.computer_delay,
            }]
        } else {
            Vec::new()
        }
    }

    fn player_move(&mut self, at: Coordinate) -> Vec<Command> {
        if self.context.computer_to_move() {
            debug!(%at, "Ignoring player move during computer turn");
            return Vec::new();
        }
        if !self.context.board.contains(at) {
            debug!(%at, "Ignoring move off the board");
            return Vec::new();
        }
        if !self.context.board.is_empty(at) {
            debug!(%at, "Ignoring move to occupied square");
            return Vec::new();
        }

        let board = self.context.board.place(at, self.context.current_player);
        self.accept_move(at, board)
    }

    fn computer_move(&mut self) -> Vec<Command> {
        let chosen = policy::random_move(
            &self.context.board,
            self.context.current_player,
            &mut self.rng,
        );
        info!(at = %chosen.at, "Computer moved");
        self.accept_move(chosen.at, chosen.board)
    }

    fn accept_move(&mut self, at: Coordinate, board: Board) -> Vec<Command> {
        let mover = self.context.current_player;
        self.context.board = board;
        self.context.total_moves += 1;
        debug!(%at, mark = %mover, total_moves = self.context.total_moves, "Move accepted");

        self.persist();
        self.enter_evaluating(mover)
    }

    fn enter_evaluating(&mut self, mover: Player) -> Vec<Command> {
        self.state = MachineState::Playing(PlayingState::Evaluating);
        vec![Command::Evaluate {
            generation: self.generation,
            board: self.context.board.clone(),
            mover,
        }]
    }

    fn finish_evaluation(&mut self, evaluation: Evaluation) -> Vec<Command> {
        if evaluation.is_win() {
            info!(
                winner = %self.context.current_player,
                lines = ?evaluation.win.categories(),
                "Game won"
            );
            self.context.win_result = Some(evaluation.win);
            self.state = MachineState::GameEnd(GameEndState::Win);
            Vec::new()
        } else if evaluation.draw {
            info!("Game drawn");
            self.state = MachineState::GameEnd(GameEndState::Draw);
            Vec::new()
        } else {
            self.enter_turn(self.context.current_player.opponent())
        }
    }

    fn reset(&mut self) -> Vec<Command> {
        self.generation += 1;
        self.context = GameContext::new(self.board_size);
        self.discard_session();
        self.state = MachineState::Idle;
        info!(generation = self.generation, "Game reset");
        vec![Command::CancelComputerMove]
    }

    fn persist(&mut self) {
        if let Err(e) = self.gateway.save(&self.context.to_session()) {
            warn!(error = %e, "Failed to persist game, continuing without resume");
        }
    }

    fn discard_session(&mut self) {
        if let Err(e) = self.gateway.clear() {
            warn!(error = %e, "Failed to clear stored game");
        }
    }
}
