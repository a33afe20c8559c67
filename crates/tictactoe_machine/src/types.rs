//! Core domain types for tic-tac-toe.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Side length of the board used when nothing else is configured.
pub const DEFAULT_BOARD_SIZE: usize = 3;

/// Player mark placed on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second, the computer in player-vs-computer games).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// Who sits across the board from player X.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum PlayerMode {
    /// Two humans share the board.
    #[serde(rename = "PvP")]
    #[strum(serialize = "player vs player")]
    PlayerVsPlayer,
    /// Player O is driven by the computer.
    #[serde(rename = "PvC")]
    #[strum(serialize = "player vs computer")]
    PlayerVsComputer,
}

/// A square on the board.
///
/// Serialized as `null` when empty and as the mark otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<Player>", into = "Option<Player>")]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl From<Option<Player>> for Square {
    fn from(mark: Option<Player>) -> Self {
        match mark {
            Some(player) => Square::Occupied(player),
            None => Square::Empty,
        }
    }
}

impl From<Square> for Option<Player> {
    fn from(square: Square) -> Self {
        match square {
            Square::Occupied(player) => Some(player),
            Square::Empty => None,
        }
    }
}

/// Zero-based `(row, col)` position on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_new::new,
    Display,
)]
#[display("({row},{col})")]
pub struct Coordinate {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index, left to right.
    pub col: usize,
}

/// Rejected board layout.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardShapeError {
    /// The board has no rows or no columns.
    #[display("Board must have at least one row and one column")]
    Empty,
    /// A row length differs from the first row.
    #[display("Row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Offending row index.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
}

/// Rectangular tic-tac-toe board, square unless built from custom rows.
///
/// Boards are values: [`Board::place`] returns a new board and leaves the
/// original untouched, so earlier snapshots stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Square>>", into = "Vec<Vec<Square>>")]
pub struct Board {
    rows: Vec<Vec<Square>>,
}

impl Board {
    /// Creates an empty `size` × `size` board.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            rows: vec![vec![Square::Empty; size]; size],
        }
    }

    /// Builds a board from explicit rows.
    ///
    /// # Errors
    ///
    /// Returns [`BoardShapeError`] if there are no cells or the rows differ
    /// in length.
    pub fn from_rows(rows: Vec<Vec<Square>>) -> Result<Self, BoardShapeError> {
        let expected = rows.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(BoardShapeError::Empty);
        }
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(BoardShapeError::Ragged {
                row,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { rows })
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn col_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// True when the board has as many rows as columns.
    pub fn is_square(&self) -> bool {
        self.row_count() == self.col_count()
    }

    /// Returns the rows of the board.
    pub fn rows(&self) -> &[Vec<Square>] {
        &self.rows
    }

    /// True if the coordinate lies on the board.
    pub fn contains(&self, at: Coordinate) -> bool {
        at.row < self.row_count() && at.col < self.col_count()
    }

    /// Gets the square at the coordinate, or `None` when off the board.
    pub fn get(&self, at: Coordinate) -> Option<Square> {
        self.rows.get(at.row).and_then(|row| row.get(at.col)).copied()
    }

    /// Checks if a square is empty.
    ///
    /// # Panics
    ///
    /// Panics if `at` is off the board.
    pub fn is_empty(&self, at: Coordinate) -> bool {
        self.rows[at.row][at.col] == Square::Empty
    }

    /// Returns a copy of the board with `mark` placed at `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` is off the board.
    #[instrument(skip(self))]
    pub fn place(&self, at: Coordinate, mark: Player) -> Board {
        let mut next = self.clone();
        next.rows[at.row][at.col] = Square::Occupied(mark);
        next
    }

    /// True if no square is empty.
    pub fn is_full(&self) -> bool {
        self.rows.iter().flatten().all(|s| *s != Square::Empty)
    }

    /// Coordinates of every empty square in row-major order.
    pub fn empty_cells(&self) -> Vec<Coordinate> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| **s == Square::Empty)
                    .map(move |(col, _)| Coordinate::new(row, col))
            })
            .collect()
    }

    /// Number of marks on the board.
    pub fn marks_placed(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|s| **s != Square::Empty)
            .count()
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let width = self.col_count();
        let divider = vec!["-"; width].join("+");
        self.rows
            .iter()
            .map(|cells| {
                cells
                    .iter()
                    .map(|square| match square {
                        Square::Empty => ".",
                        Square::Occupied(Player::X) => "X",
                        Square::Occupied(Player::O) => "O",
                    })
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join(&format!("\n{}\n", divider))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

impl TryFrom<Vec<Vec<Square>>> for Board {
    type Error = BoardShapeError;

    fn try_from(rows: Vec<Vec<Square>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Board> for Vec<Vec<Square>> {
    fn from(board: Board) -> Self {
        board.rows
    }
}
