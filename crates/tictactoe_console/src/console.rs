//! Line-based terminal front-end.
//!
//! Reads commands from stdin, forwards them to the game runtime and prints
//! the board whenever a new snapshot settles.

use anyhow::Result;
use tictactoe_machine::{
    GameEndState, GameHandle, MachineState, PlayerMode, PlayingState, Snapshot,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument, warn};

const HELP: &str = "\
Commands:
  pvp            play against another person (before start)
  pvc            play against the computer (before start)
  start          start the game
  <row> <col>    place your mark, e.g. `1 1` for the center
  reset          abandon the game and clear the saved copy
  help           show this text
  quit           leave (an unfinished game is resumed next time)";

/// A parsed line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Choose the player mode.
    Mode(PlayerMode),
    /// Start the game.
    Start,
    /// Place a mark.
    Move {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },
    /// Reset the game.
    Reset,
    /// Show help.
    Help,
    /// Leave the console.
    Quit,
}

/// Parses one input line.
#[instrument]
pub fn parse_command(line: &str) -> Result<ConsoleCommand, String> {
    let words: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();
    let words: Vec<&str> = words.iter().map(String::as_str).collect();

    let coords = |row: &str, col: &str| -> Result<ConsoleCommand, String> {
        let row = row.parse().map_err(|_| format!("Not a row number: {}", row))?;
        let col = col.parse().map_err(|_| format!("Not a column number: {}", col))?;
        Ok(ConsoleCommand::Move { row, col })
    };

    match words.as_slice() {
        ["pvp"] => Ok(ConsoleCommand::Mode(PlayerMode::PlayerVsPlayer)),
        ["pvc"] => Ok(ConsoleCommand::Mode(PlayerMode::PlayerVsComputer)),
        ["start"] => Ok(ConsoleCommand::Start),
        ["reset"] => Ok(ConsoleCommand::Reset),
        ["help"] | ["?"] => Ok(ConsoleCommand::Help),
        ["quit"] | ["exit"] | ["q"] => Ok(ConsoleCommand::Quit),
        ["move", row, col] | [row, col] => coords(*row, *col),
        [] => Err("Type `help` for commands".to_string()),
        _ => Err(format!("Unknown command: {}", line.trim())),
    }
}

/// One-line status for a snapshot.
pub fn status_line(snapshot: &Snapshot) -> String {
    let computer = snapshot.player_mode == Some(PlayerMode::PlayerVsComputer);
    match snapshot.state {
        MachineState::CheckResumable => "Loading...".to_string(),
        MachineState::Idle => match snapshot.player_mode {
            Some(mode) => format!("Mode: {}. Type `start` to play.", mode),
            None => "Choose `pvp` or `pvc`, then type `start`.".to_string(),
        },
        MachineState::Playing(PlayingState::XTurn) => "X to move.".to_string(),
        MachineState::Playing(PlayingState::OTurn) if computer => {
            "Computer is thinking...".to_string()
        }
        MachineState::Playing(PlayingState::OTurn) => "O to move.".to_string(),
        MachineState::Playing(PlayingState::Evaluating) => "Checking the board...".to_string(),
        MachineState::GameEnd(GameEndState::Win) => {
            let lines = snapshot
                .win_result
                .as_ref()
                .map(|w| {
                    w.categories()
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            format!("{} wins ({}). Type `reset` to play again.", snapshot.current_player, lines)
        }
        MachineState::GameEnd(GameEndState::Draw) => {
            "Draw. Type `reset` to play again.".to_string()
        }
    }
}

/// Board plus status line.
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    if snapshot.resumed && snapshot.total_moves > 0 {
        out.push_str("(resumed saved game)\n");
    }
    out.push_str(&snapshot.board.display());
    out.push('\n');
    out.push_str(&status_line(snapshot));
    out
}

/// Runs the console until `quit` or end of input.
#[instrument(skip(handle))]
pub async fn run(mut handle: GameHandle) -> Result<()> {
    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_printed: Option<Snapshot> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    break;
                };
                match parse_command(&line) {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(ConsoleCommand::Help) => println!("{}", HELP),
                    Ok(ConsoleCommand::Mode(mode)) => handle.select_player_mode(mode)?,
                    Ok(ConsoleCommand::Start) => handle.start_game()?,
                    Ok(ConsoleCommand::Move { row, col }) => handle.make_move(row, col)?,
                    Ok(ConsoleCommand::Reset) => handle.reset()?,
                    Err(message) => println!("{}", message),
                }
            }
            snapshot = handle.changed() => {
                let snapshot = snapshot?;
                if snapshot.state == MachineState::Playing(PlayingState::Evaluating) {
                    continue;
                }
                if last_printed.as_ref() == Some(&snapshot) {
                    // Ignored input republishes the same snapshot.
                    println!("{}", status_line(&snapshot));
                    continue;
                }
                println!("\n{}", render(&snapshot));
                last_printed = Some(snapshot);
            }
        }
    }

    if let Some(snapshot) = last_printed {
        if snapshot.state.accepts_moves() {
            warn!("Leaving mid-game, it will be resumed on next start");
        }
    }
    Ok(())
}
