//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Coordinate, Player, Square};
use serde::Serialize;
use tracing::instrument;

/// A named way to win.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, derive_more::Display,
)]
pub enum WinCategory {
    /// Every square of the row holds the mark.
    #[display("row {_0}")]
    Row(usize),
    /// Every square of the column holds the mark.
    #[display("column {_0}")]
    Column(usize),
    /// Top-left to bottom-right.
    #[display("main diagonal")]
    MainDiagonal,
    /// Top-right to bottom-left.
    #[display("anti-diagonal")]
    AntiDiagonal,
}

/// A completed line and the squares forming it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinLine {
    /// Which line was completed.
    pub category: WinCategory,
    /// Squares of the line, in row order for columns and diagonals and in
    /// column order for rows.
    pub cells: Vec<Coordinate>,
}

/// Every line completed on one evaluation, in the order rows, columns,
/// main diagonal, anti-diagonal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WinResult {
    lines: Vec<WinLine>,
}

impl WinResult {
    /// True if no line was completed.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All completed lines.
    pub fn lines(&self) -> &[WinLine] {
        &self.lines
    }

    /// Categories of the completed lines.
    pub fn categories(&self) -> Vec<WinCategory> {
        self.lines.iter().map(|line| line.category).collect()
    }

    /// True if `category` was completed.
    pub fn contains(&self, category: WinCategory) -> bool {
        self.lines.iter().any(|line| line.category == category)
    }

    /// Squares forming `category`, if it was completed.
    pub fn cells(&self, category: WinCategory) -> Option<&[Coordinate]> {
        self.lines
            .iter()
            .find(|line| line.category == category)
            .map(|line| line.cells.as_slice())
    }

    /// Every square on any completed line, without duplicates, row-major.
    pub fn winning_cells(&self) -> Vec<Coordinate> {
        let mut cells: Vec<Coordinate> = self
            .lines
            .iter()
            .flat_map(|line| line.cells.iter().copied())
            .collect();
        cells.sort();
        cells.dedup();
        cells
    }
}

/// Lists every line on the board. Diagonals exist only on square boards.
fn candidate_lines(board: &Board) -> Vec<(WinCategory, Vec<Coordinate>)> {
    let rows = board.row_count();
    let cols = board.col_count();

    let mut lines: Vec<(WinCategory, Vec<Coordinate>)> = (0..rows)
        .map(|row| {
            let cells = (0..cols).map(|col| Coordinate::new(row, col)).collect();
            (WinCategory::Row(row), cells)
        })
        .chain((0..cols).map(|col| {
            let cells = (0..rows).map(|row| Coordinate::new(row, col)).collect();
            (WinCategory::Column(col), cells)
        }))
        .collect();

    if board.is_square() {
        let size = rows;
        lines.push((
            WinCategory::MainDiagonal,
            (0..size).map(|i| Coordinate::new(i, i)).collect(),
        ));
        lines.push((
            WinCategory::AntiDiagonal,
            (0..size).map(|i| Coordinate::new(i, size - 1 - i)).collect(),
        ));
    }

    lines
}

/// Finds every line held entirely by `mover`.
#[instrument(skip(board))]
pub fn check_win(board: &Board, mover: Player) -> WinResult {
    let lines = candidate_lines(board)
        .into_iter()
        .filter(|(_, cells)| {
            cells
                .iter()
                .all(|at| board.get(*at) == Some(Square::Occupied(mover)))
        })
        .map(|(category, cells)| WinLine { category, cells })
        .collect();

    WinResult { lines }
}
